// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack controller: presentation, the toggle state machine, completions.

use alloc::vec::Vec;
use core::time::Duration;

use card_stack_surface::{Damage, LocalNode, NodeFlags, NodeId, QueryFilter, Surface, TopAnchor};
use kurbo::{Point, Rect};

use crate::card::{Card, CardState};
use crate::config::{MAX_CARDS, MIN_CARDS, OverlapPolicy, StackConfig};
use crate::error::StackError;
use crate::rules::{Placement, RulePair};
use crate::timeline::{Timeline, Transition};

/// Result of [`StackController::toggle`] and [`StackController::tap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// The card changed state and a transition is running.
    Started {
        /// Index of the toggled card.
        card: usize,
        /// State the card is now in.
        state: CardState,
    },
    /// Nothing happened.
    Ignored(Ignored),
}

impl Toggle {
    /// True if the toggle took effect.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Why a toggle had no effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ignored {
    /// [`StackController::present`] has not been called.
    NotPresented,
    /// No card has this index.
    UnknownCard,
    /// A transition is pending and the policy is [`OverlapPolicy::Reject`].
    Busy,
    /// The card below this one is collapsed, so this card is not reachable.
    ParentCollapsed,
    /// The card is expanded and so is the card stacked on it; that one has to
    /// close first.
    ChildExpanded,
    /// A tap hit no card.
    Miss,
}

/// A completion task that ran during [`StackController::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Completed {
    /// Card whose transition finished.
    pub card: usize,
    /// State of that card when the transition finished.
    pub state: CardState,
    /// Card that was revealed as a result, if any.
    pub revealed: Option<usize>,
}

#[derive(Clone, Debug)]
struct Slot {
    node: NodeId,
    rules: RulePair,
    parent: Option<usize>,
    child: Option<usize>,
}

/// Owns the cards and the surface they sit on, and runs the toggle state
/// machine.
///
/// ## Lifecycle
///
/// 1. [`new`](Self::new) validates the card count and takes ownership.
/// 2. [`present`](Self::present) attaches the cards, builds both rules for
///    each, and lays out the resting state: card 0 peeking from the bottom
///    edge, every other card hidden.
/// 3. [`toggle`](Self::toggle) (or [`tap`](Self::tap)) flips one card and
///    starts a transition.
/// 4. [`advance`](Self::advance) moves the virtual clock, interpolates
///    presented frames, and runs completions, which reveal the next card once
///    its predecessor is fully open.
///
/// Card `i` (for `i > 0`) is nested on card `i - 1`: it can only be toggled
/// while card `i - 1` is expanded, and card `i - 1` cannot collapse while card
/// `i` is expanded.
pub struct StackController<C> {
    surface: Surface,
    cards: Vec<Card<C>>,
    config: StackConfig,
    slots: Vec<Slot>,
    timeline: Timeline,
    damage: Damage,
}

impl<C> core::fmt::Debug for StackController<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let states: Vec<CardState> = self.cards.iter().map(Card::state).collect();
        f.debug_struct("StackController")
            .field("states", &states)
            .field("presented", &self.is_presented())
            .field("now", &self.timeline.now())
            .field("animating", &self.is_animating())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C> StackController<C> {
    /// Take ownership of `surface` and `cards` with the default configuration.
    ///
    /// Fails if there are fewer than [`MIN_CARDS`] or more than
    /// [`MAX_CARDS`] cards. Nothing is attached until
    /// [`present`](Self::present).
    pub fn new(surface: Surface, cards: Vec<Card<C>>) -> Result<Self, StackError> {
        Self::with_config(surface, cards, StackConfig::default())
    }

    /// Like [`new`](Self::new) with an explicit configuration.
    pub fn with_config(
        surface: Surface,
        cards: Vec<Card<C>>,
        config: StackConfig,
    ) -> Result<Self, StackError> {
        let count = cards.len();
        if count < MIN_CARDS {
            return Err(StackError::TooFewCards { count });
        }
        if count > MAX_CARDS {
            return Err(StackError::TooManyCards { count });
        }
        Ok(Self {
            surface,
            cards,
            config,
            slots: Vec::new(),
            timeline: Timeline::default(),
            damage: Damage::default(),
        })
    }

    /// Attach every card to the surface and lay out the resting state.
    ///
    /// Only card 0 is rendered; it sits on its hidden rule, peeking
    /// [`offset`](StackConfig::offset) above the surface bottom. Every other
    /// card is attached with its hidden rule active but is neither rendered
    /// nor pickable. Layout is committed immediately, without animation.
    ///
    /// Calling this a second time does nothing.
    pub fn present(&mut self) {
        if self.is_presented() {
            debug_event!("stack already presented; ignoring");
            return;
        }
        let count = self.cards.len();
        let offset = self.config.offset;
        let mut previous: Option<NodeId> = None;
        for (index, card) in self.cards.iter_mut().enumerate() {
            let flags = if index == 0 {
                NodeFlags::VISIBLE | NodeFlags::PICKABLE
            } else {
                NodeFlags::empty()
            };
            let node = self.surface.insert(LocalNode { top: None, flags });
            let visible = match previous {
                None => TopAnchor::below_surface_top(offset),
                Some(prev) => TopAnchor::below_node_top(prev, offset),
            };
            let hidden = TopAnchor::above_surface_bottom(offset);
            card.assign_index(index);
            self.slots.push(Slot {
                node,
                rules: RulePair::new(hidden, visible),
                parent: index.checked_sub(1),
                child: (index + 1 < count).then_some(index + 1),
            });
            previous = Some(node);
        }
        for index in 0..count {
            self.place(index, Placement::Hidden);
        }
        self.commit();
        debug_event!(cards = count, "stack presented");
    }

    /// Flip card `index` between collapsed and expanded.
    ///
    /// Expanding activates the card's visible rule. Collapsing activates its
    /// hidden rule and collapses every card stacked after it: those are
    /// forced collapsed, made opaque, moved to their hidden rule and no longer
    /// rendered. Layout is committed at once and a transition is started;
    /// [`advance`](Self::advance) animates it and runs its completion, which
    /// reveals the next card if this one ended up expanded.
    ///
    /// Opacity is updated right away: an expanded card dims the card below
    /// it, a collapsed one restores it.
    ///
    /// Invalid toggles leave everything untouched and report why.
    pub fn toggle(&mut self, index: usize) -> Toggle {
        if let Err(reason) = self.check_toggle(index) {
            debug_event!(card = index, ?reason, "toggle ignored");
            return Toggle::Ignored(reason);
        }

        let from = self.presented_frames();
        let previous = self.cards[index].state();
        self.cards[index].toggle_state();

        if previous == CardState::Expanded {
            self.place(index, Placement::Hidden);
            for later in index + 1..self.cards.len() {
                trace_event!(card = later, "cascade collapse");
                let card = &mut self.cards[later];
                card.set_state(CardState::Collapsed);
                card.set_opacity(1.0);
                self.place(later, Placement::Hidden);
                self.surface
                    .set_flags(self.slots[later].node, NodeFlags::empty());
            }
        } else {
            self.place(index, Placement::Visible);
        }
        self.commit();

        let to = self.layout_frames();
        self.timeline.start(Transition::new(
            index,
            self.timeline.now(),
            self.config.transition,
            from,
            to,
        ));
        self.apply_presentation();
        self.update_opacity(index);

        let state = self.cards[index].state();
        debug_event!(card = index, ?state, "toggle started");
        Toggle::Started { card: index, state }
    }

    /// Toggle the front-most rendered, pickable card under `point`.
    pub fn tap(&mut self, point: Point) -> Toggle {
        let hit = self
            .surface
            .hit_test_point(point, QueryFilter::INTERACTIVE)
            .and_then(|node| self.slots.iter().position(|slot| slot.node == node));
        match hit {
            Some(index) => self.toggle(index),
            None => {
                trace_event!(x = point.x, y = point.y, "tap missed");
                Toggle::Ignored(Ignored::Miss)
            }
        }
    }

    /// Move the virtual clock forward by `dt`.
    ///
    /// Runs, in deadline order, the completion of every transition that is
    /// now finished, then updates presented frames for the transition still in
    /// flight (or snaps them to layout if none is).
    pub fn advance(&mut self, dt: Duration) -> Vec<Completed> {
        self.timeline.tick(dt);
        let mut completed = Vec::new();
        while let Some(transition) = self.timeline.pop_due() {
            completed.push(self.complete(transition));
        }
        self.apply_presentation();
        completed
    }

    /// Run the clock until no transition is pending.
    pub fn settle(&mut self) -> Vec<Completed> {
        let mut completed = Vec::new();
        while let Some(deadline) = self.timeline.next_deadline() {
            let dt = deadline.saturating_sub(self.timeline.now());
            completed.extend(self.advance(dt));
        }
        completed
    }

    /// True while a transition has not completed.
    pub fn is_animating(&self) -> bool {
        self.timeline.is_busy()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// True once [`present`](Self::present) has run.
    pub fn is_presented(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; a stack holds at least [`MIN_CARDS`] cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in stack order.
    pub fn cards(&self) -> &[Card<C>] {
        &self.cards
    }

    /// Card at `index`.
    pub fn card(&self, index: usize) -> Option<&Card<C>> {
        self.cards.get(index)
    }

    /// The surface the cards are attached to.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Configuration in use.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Both rules of card `index`; `None` before presentation.
    pub fn rules(&self, index: usize) -> Option<&RulePair> {
        self.slots.get(index).map(|slot| &slot.rules)
    }

    /// Active rule of card `index`; `None` before presentation.
    pub fn placement(&self, index: usize) -> Option<Placement> {
        self.rules(index).map(RulePair::active)
    }

    /// True if card `index` sits on its hidden rule.
    pub fn is_hidden_active(&self, index: usize) -> bool {
        self.rules(index).is_some_and(RulePair::is_hidden_active)
    }

    /// True if card `index` sits on its visible rule.
    pub fn is_visible_active(&self, index: usize) -> bool {
        self.rules(index).is_some_and(RulePair::is_visible_active)
    }

    /// True if card `index` is rendered and accepts taps.
    pub fn is_rendered(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .and_then(|slot| self.surface.flags(slot.node))
            .is_some_and(|flags| flags.contains(NodeFlags::VISIBLE | NodeFlags::PICKABLE))
    }

    /// Layout frame of card `index`, as of the last commit.
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.slots
            .get(index)
            .and_then(|slot| self.surface.frame(slot.node))
    }

    /// On-screen frame of card `index`, interpolated while animating.
    pub fn presented_frame(&self, index: usize) -> Option<Rect> {
        self.slots
            .get(index)
            .and_then(|slot| self.surface.presented(slot.node))
    }

    /// Card indices ordered back to front.
    pub fn z_order(&self) -> Vec<usize> {
        self.surface
            .z_order()
            .into_iter()
            .filter_map(|node| self.slots.iter().position(|slot| slot.node == node))
            .collect()
    }

    /// Card that card `index` is stacked on.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.slots.get(index).and_then(|slot| slot.parent)
    }

    /// Card stacked on card `index`.
    pub fn child_of(&self, index: usize) -> Option<usize> {
        self.slots.get(index).and_then(|slot| slot.child)
    }

    /// Damage accumulated since the last call, from layout commits and
    /// presented-frame updates.
    pub fn take_damage(&mut self) -> Damage {
        let mut damage = core::mem::take(&mut self.damage);
        damage
            .dirty_rects
            .extend(self.surface.take_damage().dirty_rects);
        damage
    }

    /// Give back the surface and the cards.
    pub fn into_parts(self) -> (Surface, Vec<Card<C>>) {
        (self.surface, self.cards)
    }

    // --- internals ---

    fn check_toggle(&self, index: usize) -> Result<(), Ignored> {
        if !self.is_presented() {
            return Err(Ignored::NotPresented);
        }
        let Some(slot) = self.slots.get(index) else {
            return Err(Ignored::UnknownCard);
        };
        if self.config.overlap == OverlapPolicy::Reject && self.timeline.is_busy() {
            return Err(Ignored::Busy);
        }
        if let Some(parent) = slot.parent {
            if self.cards[parent].state() == CardState::Collapsed {
                return Err(Ignored::ParentCollapsed);
            }
        }
        if self.cards[index].state() == CardState::Expanded {
            if let Some(child) = slot.child {
                if self.cards[child].state() == CardState::Expanded {
                    return Err(Ignored::ChildExpanded);
                }
            }
        }
        Ok(())
    }

    fn complete(&mut self, transition: Transition) -> Completed {
        let index = transition.card;
        let state = self.cards[index].state();
        let mut revealed = None;
        // A newer transition of the same card owns the reveal.
        let superseded = self.timeline.is_pending_for(index);
        if state == CardState::Expanded && !superseded {
            if let Some(next) = self.slots[index].child {
                let node = self.slots[next].node;
                self.surface
                    .set_flags(node, NodeFlags::VISIBLE | NodeFlags::PICKABLE);
                if self.cards[next].state() == CardState::Collapsed {
                    self.place(next, Placement::Hidden);
                }
                self.surface.bring_to_front(node);
                self.commit();
                revealed = Some(next);
            }
        }
        debug_event!(card = index, ?state, ?revealed, "transition completed");
        Completed {
            card: index,
            state,
            revealed,
        }
    }

    fn update_opacity(&mut self, index: usize) {
        let Some(previous) = self.slots[index].parent else {
            self.cards[index].set_opacity(1.0);
            return;
        };
        if self.cards[index].state() == CardState::Expanded {
            let dimmed = self.config.dimmed_opacity;
            trace_event!(card = previous, opacity = dimmed, "dim");
            self.cards[previous].set_opacity(dimmed);
        } else {
            self.cards[previous].set_opacity(1.0);
            self.cards[index].set_opacity(1.0);
        }
    }

    fn place(&mut self, index: usize, placement: Placement) {
        let slot = &mut self.slots[index];
        let anchor = slot.rules.activate(placement);
        self.surface
            .set_top_anchor(slot.node, Some(anchor))
            .expect("card rules only reference earlier cards on the same surface");
    }

    fn commit(&mut self) {
        let damage = self.surface.commit();
        self.damage.dirty_rects.extend(damage.dirty_rects);
    }

    fn layout_frames(&self) -> Vec<Rect> {
        self.slots
            .iter()
            .map(|slot| self.surface.frame(slot.node).unwrap_or(Rect::ZERO))
            .collect()
    }

    fn presented_frames(&self) -> Vec<Rect> {
        self.slots
            .iter()
            .map(|slot| self.surface.presented(slot.node).unwrap_or(Rect::ZERO))
            .collect()
    }

    fn apply_presentation(&mut self) {
        let now = self.timeline.now();
        for (index, slot) in self.slots.iter().enumerate() {
            let frame = match self.timeline.latest() {
                Some(transition) => transition.frame_at(index, now),
                None => self.surface.frame(slot.node),
            };
            if let Some(frame) = frame {
                self.surface.set_presented(slot.node, frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

    fn stack(count: usize) -> StackController<()> {
        let cards = (0..count).map(|_| Card::new(())).collect();
        let mut stack = StackController::new(Surface::new(BOUNDS), cards).unwrap();
        stack.present();
        stack
    }

    fn assert_rules_exclusive(stack: &StackController<()>) {
        for i in 0..stack.len() {
            assert!(
                stack.is_hidden_active(i) ^ stack.is_visible_active(i),
                "card {i} must have exactly one active rule"
            );
        }
    }

    #[test]
    fn construction_validates_count() {
        for count in [0, 1] {
            let cards = vec![Card::new(()); count];
            let err = StackController::new(Surface::new(BOUNDS), cards).unwrap_err();
            assert_eq!(err, StackError::TooFewCards { count });
        }
        for count in 2..=4 {
            let cards = vec![Card::new(()); count];
            assert!(StackController::new(Surface::new(BOUNDS), cards).is_ok());
        }
        let cards = vec![Card::new(()); 5];
        let err = StackController::new(Surface::new(BOUNDS), cards).unwrap_err();
        assert_eq!(err, StackError::TooManyCards { count: 5 });
    }

    #[test]
    fn construction_does_not_attach() {
        let cards = vec![Card::new(()); 3];
        let stack = StackController::new(Surface::new(BOUNDS), cards).unwrap();
        assert!(!stack.is_presented());
        assert!(stack.surface().is_empty());
        assert_eq!(stack.card(0).and_then(Card::index), None);
    }

    #[test]
    fn toggle_before_present_is_ignored() {
        let cards = vec![Card::new(()); 2];
        let mut stack = StackController::new(Surface::new(BOUNDS), cards).unwrap();
        assert_eq!(stack.toggle(0), Toggle::Ignored(Ignored::NotPresented));
    }

    #[test]
    fn present_shows_only_the_first_card() {
        let stack = stack(4);
        assert!(stack.is_rendered(0));
        for i in 1..4 {
            assert!(!stack.is_rendered(i), "card {i} starts hidden");
        }
        for (i, card) in stack.cards().iter().enumerate() {
            assert_eq!(card.index(), Some(i));
            assert_eq!(card.state(), CardState::Collapsed);
        }
        assert_eq!(stack.placement(0), Some(Placement::Hidden));
        assert_eq!(stack.frame(0).map(|r| r.y0), Some(844.0 - 50.0));
        assert_eq!(stack.frame(0).map(|r| r.height()), Some(844.0));
        assert_rules_exclusive(&stack);
        assert!(!stack.is_animating());
    }

    #[test]
    fn present_records_explicit_links() {
        let stack = stack(3);
        assert_eq!(stack.parent_of(0), None);
        assert_eq!(stack.parent_of(2), Some(1));
        assert_eq!(stack.child_of(0), Some(1));
        assert_eq!(stack.child_of(2), None);
    }

    #[test]
    fn second_present_is_ignored() {
        let mut stack = stack(2);
        stack.present();
        assert_eq!(stack.surface().len(), 2);
    }

    #[test]
    fn expanding_reveals_the_next_card_after_completion() {
        let mut stack = stack(3);
        assert_eq!(
            stack.toggle(0),
            Toggle::Started {
                card: 0,
                state: CardState::Expanded
            }
        );
        assert_eq!(stack.placement(0), Some(Placement::Visible));
        assert_eq!(stack.frame(0).map(|r| r.y0), Some(50.0));
        assert!(!stack.is_rendered(1), "not before the transition completes");
        assert_eq!(stack.card(0).map(Card::opacity), Some(1.0));

        assert!(stack.advance(Duration::from_millis(100)).is_empty());
        assert!(!stack.is_rendered(1));

        let done = stack.advance(Duration::from_millis(200));
        assert_eq!(
            done,
            [Completed {
                card: 0,
                state: CardState::Expanded,
                revealed: Some(1)
            }]
        );
        assert!(stack.is_rendered(1));
        assert_eq!(stack.placement(1), Some(Placement::Hidden));
        assert_eq!(stack.z_order().last(), Some(&1));
        assert!(!stack.is_rendered(2));
        assert_rules_exclusive(&stack);
    }

    #[test]
    fn presented_frames_move_during_the_transition() {
        let mut stack = stack(2);
        let start = stack.presented_frame(0).unwrap();
        stack.toggle(0);
        assert_eq!(stack.presented_frame(0), Some(start));

        let _ = stack.advance(Duration::from_millis(150));
        let mid = stack.presented_frame(0).unwrap();
        assert!(mid.y0 < start.y0 && mid.y0 > 50.0);

        let _ = stack.settle();
        assert_eq!(stack.presented_frame(0), stack.frame(0));
        assert!(!stack.take_damage().is_empty());
    }

    #[test]
    fn expanding_dims_the_previous_card() {
        let mut stack = stack(3);
        stack.toggle(0);
        let _ = stack.settle();
        stack.toggle(1);
        assert_eq!(stack.card(0).map(Card::opacity), Some(0.38));
        assert_eq!(stack.card(1).map(Card::opacity), Some(1.0));
        assert_eq!(stack.frame(1).map(|r| r.y0), Some(100.0));
    }

    #[test]
    fn collapsed_parent_blocks_toggle() {
        let mut stack = stack(3);
        assert_eq!(stack.toggle(1), Toggle::Ignored(Ignored::ParentCollapsed));
        assert_eq!(stack.card(1).map(Card::state), Some(CardState::Collapsed));
    }

    #[test]
    fn expanded_child_blocks_collapse() {
        let mut stack = stack(3);
        stack.toggle(0);
        let _ = stack.settle();
        stack.toggle(1);
        let _ = stack.settle();
        assert_eq!(stack.toggle(0), Toggle::Ignored(Ignored::ChildExpanded));
        assert_eq!(stack.card(0).map(Card::state), Some(CardState::Expanded));
    }

    #[test]
    fn collapsing_cascades_to_later_cards() {
        let mut stack = stack(4);
        for i in 0..3 {
            assert!(stack.toggle(i).is_started());
            let _ = stack.settle();
        }
        assert!(stack.is_rendered(3));

        // Collapse from the top down to card 1.
        stack.toggle(2);
        let _ = stack.settle();
        stack.toggle(1);
        for i in 2..4 {
            let card = stack.card(i).unwrap();
            assert_eq!(card.state(), CardState::Collapsed);
            assert_eq!(card.opacity(), 1.0);
            assert!(!stack.is_rendered(i));
            assert!(stack.is_hidden_active(i));
        }
        assert_eq!(stack.card(0).map(Card::opacity), Some(1.0));
        let done = stack.settle();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].revealed, None);
        assert_rules_exclusive(&stack);
    }

    #[test]
    fn reject_policy_ignores_toggles_mid_transition() {
        let mut stack = stack(2);
        stack.toggle(0);
        assert_eq!(stack.toggle(0), Toggle::Ignored(Ignored::Busy));
        let _ = stack.settle();
        assert!(stack.toggle(0).is_started());
    }

    #[test]
    fn allow_policy_rechecks_state_on_completion() {
        let cards = vec![Card::new(()); 2];
        let config = StackConfig::new().with_overlap(OverlapPolicy::Allow);
        let mut stack = StackController::with_config(Surface::new(BOUNDS), cards, config).unwrap();
        stack.present();

        stack.toggle(0);
        let _ = stack.advance(Duration::from_millis(100));
        assert!(stack.toggle(0).is_started(), "double tap collapses again");

        let done = stack.settle();
        assert_eq!(done.len(), 2);
        assert!(done.iter().all(|c| c.revealed.is_none()));
        assert!(!stack.is_rendered(1));
        assert_eq!(stack.card(0).map(Card::state), Some(CardState::Collapsed));
        assert_eq!(stack.presented_frame(0), stack.frame(0));
    }

    #[test]
    fn allow_policy_reveals_only_after_the_last_expand() {
        let cards = vec![Card::new(()); 3];
        let config = StackConfig::new().with_overlap(OverlapPolicy::Allow);
        let mut stack = StackController::with_config(Surface::new(BOUNDS), cards, config).unwrap();
        stack.present();

        // Expand, collapse, expand, 100ms apart.
        for _ in 0..3 {
            assert!(stack.toggle(0).is_started());
            let _ = stack.advance(Duration::from_millis(100));
        }
        assert_eq!(stack.now(), Duration::from_millis(300));
        assert_eq!(stack.card(0).map(Card::state), Some(CardState::Expanded));
        assert!(stack.is_animating());
        assert!(!stack.is_rendered(1), "first expand is superseded");

        let done = stack.advance(Duration::from_millis(100));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].revealed, None);
        assert!(!stack.is_rendered(1));

        let done = stack.settle();
        assert_eq!(
            done,
            [Completed {
                card: 0,
                state: CardState::Expanded,
                revealed: Some(1)
            }]
        );
        assert_eq!(stack.now(), Duration::from_millis(500));
        assert!(stack.is_rendered(1));
        assert_rules_exclusive(&stack);
    }

    #[test]
    fn expanding_the_last_card_reveals_nothing() {
        let mut stack = stack(2);
        stack.toggle(0);
        let _ = stack.settle();
        let z_before = stack.z_order();
        assert!(stack.is_rendered(1));

        assert!(stack.toggle(1).is_started());
        let done = stack.settle();
        assert_eq!(
            done,
            [Completed {
                card: 1,
                state: CardState::Expanded,
                revealed: None
            }]
        );
        assert_eq!(stack.card(0).map(Card::opacity), Some(0.38));
        assert_eq!(stack.card(1).map(Card::opacity), Some(1.0));
        assert_eq!(stack.z_order(), z_before);
        assert!(stack.is_rendered(0) && stack.is_rendered(1));
        assert_eq!(stack.frame(1).map(|r| r.y0), Some(100.0));
        assert_rules_exclusive(&stack);
    }

    #[test]
    fn tap_routes_to_the_front_card() {
        let mut stack = stack(2);
        assert_eq!(
            stack.tap(Point::new(10.0, 10.0)),
            Toggle::Ignored(Ignored::Miss)
        );
        assert!(stack.tap(Point::new(10.0, 820.0)).is_started());
        let _ = stack.settle();

        // Card 1 now peeks at the bottom in front of card 0.
        assert_eq!(
            stack.tap(Point::new(10.0, 820.0)),
            Toggle::Started {
                card: 1,
                state: CardState::Expanded
            }
        );
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut stack = stack(2);
        assert_eq!(stack.toggle(7), Toggle::Ignored(Ignored::UnknownCard));
    }
}
