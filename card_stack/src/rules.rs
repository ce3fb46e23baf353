// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two positioning rules of a card.

use card_stack_surface::TopAnchor;

/// Which of a card's two rules is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Off the bottom edge, leaving a strip visible.
    Hidden,
    /// Slid up into the stack, below the previous card's top edge.
    Visible,
}

/// A card's hidden and visible rules, exactly one of which is active.
///
/// Keeping the active side as a single [`Placement`] makes it impossible to
/// hand the surface two conflicting rules for one card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RulePair {
    hidden: TopAnchor,
    visible: TopAnchor,
    active: Placement,
}

impl RulePair {
    /// A pair with the hidden rule active.
    pub(crate) const fn new(hidden: TopAnchor, visible: TopAnchor) -> Self {
        Self {
            hidden,
            visible,
            active: Placement::Hidden,
        }
    }

    /// Switch to `placement` and return the rule the surface should use.
    pub(crate) fn activate(&mut self, placement: Placement) -> TopAnchor {
        self.active = placement;
        self.anchor()
    }

    /// Which rule is active.
    pub fn active(&self) -> Placement {
        self.active
    }

    /// The active rule.
    pub fn anchor(&self) -> TopAnchor {
        match self.active {
            Placement::Hidden => self.hidden,
            Placement::Visible => self.visible,
        }
    }

    /// The hidden-position rule.
    pub fn hidden(&self) -> TopAnchor {
        self.hidden
    }

    /// The visible-position rule.
    pub fn visible(&self) -> TopAnchor {
        self.visible
    }

    /// True if the hidden rule is the active one.
    pub fn is_hidden_active(&self) -> bool {
        self.active == Placement::Hidden
    }

    /// True if the visible rule is the active one.
    pub fn is_visible_active(&self) -> bool {
        self.active == Placement::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_rule_is_active() {
        let hidden = TopAnchor::above_surface_bottom(50.0);
        let visible = TopAnchor::below_surface_top(50.0);
        let mut pair = RulePair::new(hidden, visible);
        assert!(pair.is_hidden_active() && !pair.is_visible_active());
        assert_eq!(pair.anchor(), hidden);

        assert_eq!(pair.activate(Placement::Visible), visible);
        assert!(pair.is_visible_active() && !pair.is_hidden_active());

        assert_eq!(pair.activate(Placement::Hidden), hidden);
        assert_eq!(pair.active(), Placement::Hidden);
    }
}
