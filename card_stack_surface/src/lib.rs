// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=card_stack_surface --heading-base-level=0

//! Card Stack Surface: a Kurbo-native container for anchored, stacked panels.
//!
//! The surface is the parent that card panels attach to. It is deliberately small:
//!
//! - Every node spans the full surface width and is as tall as the surface.
//! - A node's vertical position comes from one [`TopAnchor`] rule: an offset from the surface top,
//!   the surface bottom, or the top edge of a node inserted earlier.
//! - Nodes carry [`NodeFlags`] (rendered, pickable) and a z-order; [`Surface::bring_to_front`]
//!   moves a node above the rest.
//! - [`Surface::commit`] resolves rules into frames and yields coarse [`Damage`].
//!
//! ## Not a layout engine
//!
//! There is no measurement, no constraint solver and no priorities. Rules may only point backwards
//! in insertion order, so a single pass resolves them and no rule set can be unsatisfiable.
//!
//! ## Presented frames
//!
//! Each node has a layout frame (the result of the last commit) and a presented frame (what is on
//! screen right now). They are equal after a commit; an animation driver overrides the presented
//! frame with [`Surface::set_presented`] while it interpolates between two layouts.
//! Hit testing always uses the layout frame.
//!
//! ## API overview
//!
//! - [`Surface`]: container managing nodes and rule resolution.
//! - [`LocalNode`]: per-node input (rule and flags).
//! - [`TopAnchor`] / [`AnchorTarget`]: vertical rules.
//! - [`NodeId`]: handle of a node, scoped to the surface that issued it.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use card_stack_surface::{LocalNode, QueryFilter, Surface, TopAnchor};
//! use kurbo::{Point, Rect};
//!
//! let mut surface = Surface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//!
//! let back = surface.insert(LocalNode {
//!     top: Some(TopAnchor::below_surface_top(50.0)),
//!     ..Default::default()
//! });
//! let front = surface.insert(LocalNode::default());
//! surface
//!     .set_top_anchor(front, Some(TopAnchor::below_node_top(back, 50.0)))
//!     .unwrap();
//!
//! let _ = surface.commit();
//! assert_eq!(surface.frame(front).unwrap().y0, 100.0);
//!
//! // The front node wins where both overlap.
//! let hit = surface.hit_test_point(Point::new(20.0, 120.0), QueryFilter::INTERACTIVE);
//! assert_eq!(hit, Some(front));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod surface;
mod types;

pub use damage::Damage;
pub use surface::{QueryFilter, Surface};
pub use types::{AnchorError, AnchorTarget, LocalNode, NodeFlags, NodeId, TopAnchor};
