// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual clock and pending transitions.
//!
//! The controller never reads a wall clock. Time only moves when the host calls
//! [`StackController::advance`](crate::StackController::advance) (typically from
//! its frame callback with the frame delta) or
//! [`StackController::settle`](crate::StackController::settle), which jumps to
//! the last pending deadline. Each transition carries the frames of every card
//! at its start and end; presented frames are interpolated between the two, and
//! the transition's completion task runs once the clock passes its deadline.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;

/// Easing for expand/collapse: starts at rest, rises monotonically, and
/// settles at `1.0` without overshoot, like a critically damped spring.
///
/// `t` is clamped to `0.0..=1.0`.
#[must_use]
pub fn damped(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let rest = 1.0 - t;
    1.0 - rest * rest * rest * (1.0 + 3.0 * t)
}

/// One expand or collapse of a card, from start to completion.
#[derive(Clone, Debug)]
pub(crate) struct Transition {
    pub(crate) card: usize,
    started_at: Duration,
    duration: Duration,
    from: Vec<Rect>,
    to: Vec<Rect>,
}

impl Transition {
    pub(crate) fn new(
        card: usize,
        started_at: Duration,
        duration: Duration,
        from: Vec<Rect>,
        to: Vec<Rect>,
    ) -> Self {
        debug_assert_eq!(from.len(), to.len(), "one start and end frame per card");
        Self {
            card,
            started_at,
            duration,
            from,
            to,
        }
    }

    pub(crate) fn deadline(&self) -> Duration {
        self.started_at.saturating_add(self.duration)
    }

    /// Linear progress in `0.0..=1.0`.
    pub(crate) fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Presented frame of card `index` at `now`.
    pub(crate) fn frame_at(&self, index: usize, now: Duration) -> Option<Rect> {
        let from = *self.from.get(index)?;
        let to = *self.to.get(index)?;
        let t = damped(self.progress(now));
        Some(Rect::new(
            lerp(from.x0, to.x0, t),
            lerp(from.y0, to.y0, t),
            lerp(from.x1, to.x1, t),
            lerp(from.y1, to.y1, t),
        ))
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Virtual clock plus transitions ordered by deadline.
#[derive(Clone, Debug, Default)]
pub(crate) struct Timeline {
    now: Duration,
    pending: VecDeque<Transition>,
}

impl Timeline {
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    pub(crate) fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn tick(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    pub(crate) fn start(&mut self, transition: Transition) {
        let deadline = transition.deadline();
        let at = self
            .pending
            .iter()
            .position(|t| t.deadline() > deadline)
            .unwrap_or(self.pending.len());
        self.pending.insert(at, transition);
    }

    /// Remove and return the earliest transition whose deadline has passed.
    pub(crate) fn pop_due(&mut self) -> Option<Transition> {
        if self.pending.front()?.deadline() <= self.now {
            self.pending.pop_front()
        } else {
            None
        }
    }

    /// True if a transition started for `card` has not completed yet.
    pub(crate) fn is_pending_for(&self, card: usize) -> bool {
        self.pending.iter().any(|t| t.card == card)
    }

    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.pending.front().map(Transition::deadline)
    }

    /// The most recently started transition still pending; it owns the
    /// presented frames.
    pub(crate) fn latest(&self) -> Option<&Transition> {
        self.pending.iter().max_by_key(|t| t.started_at)
    }
}
