// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use core::time::Duration;

/// Smallest stack the controller accepts.
pub const MIN_CARDS: usize = 2;

/// Largest stack the controller accepts.
pub const MAX_CARDS: usize = 4;

/// What [`StackController::toggle`](crate::StackController::toggle) does
/// while an earlier transition has not completed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OverlapPolicy {
    /// Ignore the toggle and report [`Ignored::Busy`](crate::Ignored::Busy).
    #[default]
    Reject,
    /// Start the new transition immediately. Completions of older transitions
    /// still run, and only reveal the next card if their card is still
    /// expanded at that point.
    Allow,
}

/// Configuration for the [`StackController`](crate::StackController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Vertical step between stacked cards, and the strip of a hidden card
    /// left peeking above the surface bottom.
    pub offset: f64,
    /// Length of one expand or collapse transition.
    pub transition: Duration,
    /// Opacity of a card while the card stacked on it is expanded.
    pub dimmed_opacity: f32,
    /// Handling of toggles that arrive mid-transition.
    pub overlap: OverlapPolicy,
}

impl StackConfig {
    /// Default configuration: 50 unit steps, 300 ms transitions, 0.38 dimming,
    /// overlapping toggles rejected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 50.0,
            transition: Duration::from_millis(300),
            dimmed_opacity: 0.38,
            overlap: OverlapPolicy::Reject,
        }
    }

    /// Replace the card step / peek height.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the transition length.
    #[must_use]
    pub const fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Replace the opacity of dimmed cards.
    #[must_use]
    pub const fn with_dimmed_opacity(mut self, dimmed_opacity: f32) -> Self {
        self.dimmed_opacity = dimmed_opacity;
        self
    }

    /// Replace the overlap policy.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new()
    }
}
