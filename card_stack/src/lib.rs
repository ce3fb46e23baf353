// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=card_stack --heading-base-level=0

//! Card Stack: a deterministic, `no_std` state machine for a deck of two to four stacked cards.
//!
//! ## Overview
//!
//! Each [`Card`] is collapsed or expanded. The [`StackController`] owns the cards and the
//! [`Surface`](card_stack_surface::Surface) they are attached to, gives every card two positioning
//! rules (hidden: peeking above the surface bottom; visible: stacked a fixed step below the previous
//! card's top edge) and switches between them as cards are tapped.
//!
//! - Only the first card is shown at first. Expanding card `i` slides it up; once that transition
//!   completes, card `i + 1` appears at the bottom, in front of the others.
//! - Expanding a card dims the card below it; collapsing restores it.
//! - Collapsing card `i` also collapses and hides every card after it.
//! - A card cannot be toggled while the card below it is collapsed, and an expanded card cannot
//!   collapse while the card on top of it is expanded. Such taps are ignored.
//!
//! ## Time
//!
//! There is no hidden animation runtime. Transitions are entries on a virtual timeline:
//! [`StackController::toggle`] returns as soon as a transition is started, the host moves time with
//! [`StackController::advance`] (for example from a frame callback), and completions run from there.
//! [`StackController::settle`] fast-forwards to the end, which is what tests use.
//!
//! ## Example
//!
//! ```
//! use card_stack::{Card, CardState, Ignored, StackController, Toggle};
//! use card_stack_surface::Surface;
//! use kurbo::Rect;
//!
//! let surface = Surface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//! let cards = (0..4).map(|_| Card::new(())).collect();
//! let mut stack = StackController::new(surface, cards).unwrap();
//! stack.present();
//! assert!(stack.is_rendered(0) && !stack.is_rendered(1));
//!
//! // Open the first card; the second appears once the transition completes.
//! assert!(stack.toggle(0).is_started());
//! assert!(!stack.is_rendered(1));
//! stack.settle();
//! assert!(stack.is_rendered(1));
//!
//! // Open the second card; the first is dimmed.
//! stack.toggle(1);
//! stack.settle();
//! assert_eq!(stack.card(0).unwrap().opacity(), 0.38);
//!
//! // The first card cannot close while the second is open.
//! assert_eq!(stack.toggle(0), Toggle::Ignored(Ignored::ChildExpanded));
//!
//! // Closing the second card restores the first.
//! stack.toggle(1);
//! stack.settle();
//! assert_eq!(stack.card(1).unwrap().state(), CardState::Collapsed);
//! assert_eq!(stack.card(0).unwrap().opacity(), 1.0);
//! ```
//!
//! ## Crate features
//!
//! - `std` (enabled by default): Enables `std` support in dependencies.
//! - `libm`: `no_std` float support for dependencies.
//! - `tracing`: Emits `tracing` events for presentation, toggles and completions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod trace;

mod card;
mod config;
mod controller;
mod error;
mod rules;
pub mod timeline;

pub use card::{Card, CardContent, CardState, Indicator, Rgba8};
pub use config::{MAX_CARDS, MIN_CARDS, OverlapPolicy, StackConfig};
pub use controller::{Completed, Ignored, StackController, Toggle};
pub use error::StackError;
pub use rules::{Placement, RulePair};
