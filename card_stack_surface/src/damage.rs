// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched damage returned by [`Surface::commit`](crate::Surface::commit).

use alloc::vec::Vec;
use kurbo::Rect;

/// A batched set of changes derived from [`Surface::commit`](crate::Surface::commit).
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Surface-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if no damage entries recorded.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Union of all dirty rectangles. Returns `None` if empty.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    pub(crate) fn push_pair(&mut self, old: Rect, new: Rect) {
        if old == new {
            return;
        }
        if old.width() > 0.0 && old.height() > 0.0 {
            self.dirty_rects.push(old);
        }
        if new.width() > 0.0 && new.height() > 0.0 {
            self.dirty_rects.push(new);
        }
    }
}
