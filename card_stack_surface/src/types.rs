// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the surface: node identifiers, flags, anchors, and errors.

use core::fmt;

/// Identifier for a node on a [`Surface`](crate::Surface).
///
/// This is a small, copyable handle. It consists of a slot index and the
/// identity of the surface that issued it, so a handle from one surface is
/// never mistaken for a node on another.
///
/// Nodes are never removed, so a `NodeId` stays valid for the lifetime of the
/// surface that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, surface: u32) -> Self {
        Self(idx, surface)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Insertion position of this node on its surface.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.idx()
    }
}

bitflags::bitflags! {
    /// Node flags controlling rendering and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is rendered.
        const VISIBLE  = 0b0000_0001;
        /// Node receives taps (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// What a node's top edge is attached to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnchorTarget {
    /// The top edge of the surface.
    SurfaceTop,
    /// The bottom edge of the surface.
    SurfaceBottom,
    /// The resolved top edge of another node.
    ///
    /// The referenced node must have been inserted before the anchored one.
    NodeTop(NodeId),
}

/// A vertical positioning rule: `top = target + offset`.
///
/// Horizontally every node spans the full surface width, and its height is
/// bound to the surface height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TopAnchor {
    /// Edge the node is attached to.
    pub target: AnchorTarget,
    /// Signed distance from the target edge, positive is downward.
    pub offset: f64,
}

impl TopAnchor {
    /// `top = surface.top + offset`.
    #[must_use]
    pub const fn below_surface_top(offset: f64) -> Self {
        Self {
            target: AnchorTarget::SurfaceTop,
            offset,
        }
    }

    /// `top = surface.bottom - inset`.
    #[must_use]
    pub const fn above_surface_bottom(inset: f64) -> Self {
        Self {
            target: AnchorTarget::SurfaceBottom,
            offset: -inset,
        }
    }

    /// `top = node.top + offset`.
    #[must_use]
    pub const fn below_node_top(node: NodeId, offset: f64) -> Self {
        Self {
            target: AnchorTarget::NodeTop(node),
            offset,
        }
    }
}

/// Per-node state supplied on insert.
#[derive(Clone, Debug, Default)]
pub struct LocalNode {
    /// Active vertical rule, if any. A node without a rule collapses to a
    /// zero-height strip at the surface top.
    pub top: Option<TopAnchor>,
    /// Rendering and picking flags.
    ///
    /// See [`NodeFlags`] for available bits and how they interact with
    /// [`QueryFilter`](crate::QueryFilter).
    pub flags: NodeFlags,
}

/// Errors raised when attaching a rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnchorError {
    /// The node (or the anchor's target node) does not belong to this surface.
    StaleNode(NodeId),
    /// The anchor targets the node itself or a node inserted after it.
    ForwardReference {
        /// Node receiving the rule.
        node: NodeId,
        /// Node the rule points at.
        target: NodeId,
    },
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNode(id) => write!(f, "node {id:?} does not belong to this surface"),
            Self::ForwardReference { node, target } => write!(
                f,
                "node {node:?} cannot anchor to {target:?}, which is not inserted before it"
            ),
        }
    }
}

impl core::error::Error for AnchorError {}
