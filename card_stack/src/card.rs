// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single panel of the stack.

/// Display state of a card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CardState {
    /// Resting position; the card shows only its top strip.
    #[default]
    Collapsed,
    /// Opened; the card is slid up into the stack.
    Expanded,
}

impl CardState {
    /// The other state.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Glyph shown in the corner of a card, telling what a tap will do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Upward arrow; a tap expands the card.
    Expand,
    /// Downward arrow; a tap collapses the card.
    Collapse,
}

impl Indicator {
    /// Indicator matching a card state.
    #[must_use]
    pub const fn for_state(state: CardState) -> Self {
        match state {
            CardState::Collapsed => Self::Expand,
            CardState::Expanded => Self::Collapse,
        }
    }

    /// A plain-text rendering of the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Expand => '\u{25B2}',
            Self::Collapse => '\u{25BC}',
        }
    }
}

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Host content embedded in a card.
pub trait CardContent {
    /// Background of the content, which the card adopts as its own.
    fn background(&self) -> Option<Rgba8> {
        None
    }
}

impl CardContent for () {}

/// A card: host content plus the state the controller drives.
#[derive(Clone, Debug)]
pub struct Card<C> {
    content: C,
    background: Option<Rgba8>,
    state: CardState,
    indicator: Indicator,
    index: Option<usize>,
    opacity: f32,
    revision: u32,
}

impl<C: CardContent> Card<C> {
    /// Wrap host content. The card starts collapsed and fully opaque.
    pub fn new(content: C) -> Self {
        let background = content.background();
        Self {
            content,
            background,
            state: CardState::Collapsed,
            indicator: Indicator::for_state(CardState::Collapsed),
            index: None,
            opacity: 1.0,
            revision: 0,
        }
    }
}

impl<C> Card<C> {
    /// Current display state.
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Set the display state and refresh the indicator.
    pub fn set_state(&mut self, state: CardState) {
        self.state = state;
        self.state_changed();
    }

    /// Flip between collapsed and expanded.
    pub fn toggle_state(&mut self) {
        self.set_state(self.state.flipped());
    }

    /// Glyph for the current state.
    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Bumped each time the state is written, so a renderer can tell when to
    /// redraw the indicator.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Position in the stack; `None` until the stack is presented.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Opacity set by the controller; `1.0` is opaque.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Background adopted from the content.
    pub fn background(&self) -> Option<Rgba8> {
        self.background
    }

    /// The embedded content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// The embedded content, mutably.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Unwrap the embedded content.
    pub fn into_content(self) -> C {
        self.content
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    pub(crate) fn assign_index(&mut self, index: usize) {
        debug_assert!(self.index.is_none(), "card index is assigned once");
        self.index = Some(index);
    }

    fn state_changed(&mut self) {
        self.indicator = Indicator::for_state(self.state);
        self.revision = self.revision.wrapping_add(1);
    }
}
