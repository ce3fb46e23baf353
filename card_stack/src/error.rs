// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use core::fmt;

use crate::config::{MAX_CARDS, MIN_CARDS};

/// Reasons a [`StackController`](crate::StackController) cannot be built.
///
/// Both are final for the rejected input: build a new card list with a count
/// in `MIN_CARDS..=MAX_CARDS` and construct again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StackError {
    /// Fewer than [`MIN_CARDS`] cards were passed.
    TooFewCards {
        /// Number of cards passed.
        count: usize,
    },
    /// More than [`MAX_CARDS`] cards were passed.
    TooManyCards {
        /// Number of cards passed.
        count: usize,
    },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCards { count } => {
                write!(f, "a card stack needs at least {MIN_CARDS} cards, got {count}")
            }
            Self::TooManyCards { count } => {
                write!(f, "a card stack holds at most {MAX_CARDS} cards, got {count}")
            }
        }
    }
}

impl core::error::Error for StackError {}
