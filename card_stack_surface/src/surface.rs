// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core surface implementation: structure, rule resolution, queries.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};
use kurbo::{Point, Rect};

use crate::damage::Damage;
use crate::types::{AnchorError, AnchorTarget, LocalNode, NodeFlags, NodeId, TopAnchor};

static NEXT_SURFACE_ID: AtomicU32 = AtomicU32::new(1);

/// The parent container that card nodes are attached to.
pub struct Surface {
    id: u32,
    bounds: Rect,
    nodes: Vec<Node>,
    next_z: i32,
    epoch: u64,
    pending: Damage,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let visible = self
            .nodes
            .iter()
            .filter(|n| n.local.flags.contains(NodeFlags::VISIBLE))
            .count();
        f.debug_struct("Surface")
            .field("bounds", &self.bounds)
            .field("nodes_total", &self.nodes.len())
            .field("nodes_visible", &visible)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Filters applied during hit testing.
///
/// Used by [`Surface::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Only rendered nodes that accept taps.
    pub const INTERACTIVE: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}

#[derive(Clone, Copy, Debug, Default)]
struct Dirty {
    layout: bool,
    flags: bool,
    z: bool,
}

#[derive(Clone, Debug)]
struct Node {
    local: LocalNode,
    z_index: i32,
    frame: Rect,
    presented: Rect,
    committed_flags: NodeFlags,
    dirty: Dirty,
}

impl Node {
    fn new(local: LocalNode, z_index: i32) -> Self {
        Self {
            local,
            z_index,
            frame: Rect::ZERO,
            presented: Rect::ZERO,
            committed_flags: NodeFlags::empty(),
            dirty: Dirty {
                layout: true,
                flags: true,
                z: true,
            },
        }
    }
}

impl Surface {
    /// Create an empty surface covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            id: NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed),
            bounds,
            nodes: Vec::new(),
            next_z: 0,
            epoch: 0,
            pending: Damage::default(),
        }
    }

    /// Bounds of the surface.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of nodes attached to the surface.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node has been attached.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of completed [`commit`](Self::commit) passes.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Attach a new node. It is placed in front of every existing node.
    ///
    /// The node's anchor, if any, is not validated here; use
    /// [`set_top_anchor`](Self::set_top_anchor) for checked updates.
    pub fn insert(&mut self, local: LocalNode) -> NodeId {
        let z = self.take_front_z();
        self.nodes.push(Node::new(local, z));
        self.id_at(self.nodes.len() - 1)
    }

    /// Returns true if `id` was issued by this surface.
    pub fn contains(&self, id: NodeId) -> bool {
        id.1 == self.id && id.idx() < self.nodes.len()
    }

    /// Replace the vertical rule of a node.
    ///
    /// A rule may only point at a node inserted before `id`, which keeps the
    /// rule graph acyclic and lets [`commit`](Self::commit) resolve frames in a
    /// single pass.
    pub fn set_top_anchor(
        &mut self,
        id: NodeId,
        anchor: Option<TopAnchor>,
    ) -> Result<(), AnchorError> {
        if !self.contains(id) {
            return Err(AnchorError::StaleNode(id));
        }
        if let Some(TopAnchor {
            target: AnchorTarget::NodeTop(target),
            ..
        }) = anchor
        {
            if !self.contains(target) {
                return Err(AnchorError::StaleNode(target));
            }
            if target.idx() >= id.idx() {
                return Err(AnchorError::ForwardReference { node: id, target });
            }
        }
        let n = self.node_mut(id);
        if n.local.top != anchor {
            n.local.top = anchor;
            n.dirty.layout = true;
        }
        Ok(())
    }

    /// Current vertical rule of a node.
    pub fn top_anchor(&self, id: NodeId) -> Option<TopAnchor> {
        self.node_opt(id).and_then(|n| n.local.top)
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            if n.local.flags != flags {
                n.local.flags = flags;
                n.dirty.flags = true;
            }
        }
    }

    /// Flags of a node, or `None` for a foreign id.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Move a node in front of every other node.
    pub fn bring_to_front(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        if self.z_order().last() == Some(&id) {
            return;
        }
        let z = self.take_front_z();
        let n = self.node_mut(id);
        n.z_index = z;
        n.dirty.z = true;
    }

    /// Returns the z-index of a node. Higher is drawn on top.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.node_opt(id).map(|n| n.z_index)
    }

    /// Node ids ordered back to front.
    pub fn z_order(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = (0..self.nodes.len()).map(|i| self.id_at(i)).collect();
        ids.sort_by_key(|id| self.nodes[id.idx()].z_index);
        ids
    }

    /// Frame resolved by the last [`commit`](Self::commit).
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.frame)
    }

    /// Frame currently on screen. Equal to [`frame`](Self::frame) unless an
    /// animation is interpolating between layouts.
    pub fn presented(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.presented)
    }

    /// Override the on-screen frame of a node until the next commit.
    pub fn set_presented(&mut self, id: NodeId, rect: Rect) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let old = n.presented;
        n.presented = rect;
        if n.local.flags.contains(NodeFlags::VISIBLE) {
            self.pending.push_pair(old, rect);
        }
    }

    /// Drain damage accumulated by [`set_presented`](Self::set_presented)
    /// without running layout.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.pending)
    }

    /// True if any rule, flag or z-order changed since the last commit.
    pub fn needs_commit(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| n.dirty.layout || n.dirty.flags || n.dirty.z)
    }

    /// Resolve all rules into frames and return coarse damage.
    ///
    /// Presented frames snap to the resolved layout.
    pub fn commit(&mut self) -> Damage {
        let mut damage = core::mem::take(&mut self.pending);
        for i in 0..self.nodes.len() {
            let top = match self.nodes[i].local.top {
                None => self.bounds.y0,
                Some(anchor) => self.resolve(anchor) + anchor.offset,
            };
            let height = if self.nodes[i].local.top.is_some() {
                self.bounds.height()
            } else {
                0.0
            };
            let frame = Rect::new(self.bounds.x0, top, self.bounds.x1, top + height);

            let node = &mut self.nodes[i];
            let was_visible = node.committed_flags.contains(NodeFlags::VISIBLE);
            let is_visible = node.local.flags.contains(NodeFlags::VISIBLE);
            let old = if was_visible { node.presented } else { Rect::ZERO };
            let new = if is_visible { frame } else { Rect::ZERO };
            damage.push_pair(old, new);
            if node.dirty.z && is_visible && old == new {
                damage.dirty_rects.push(frame);
            }

            node.frame = frame;
            node.presented = frame;
            node.committed_flags = node.local.flags;
            node.dirty = Dirty::default();
        }
        self.epoch += 1;
        damage
    }

    /// Hit test a surface-space point. Returns the topmost matching node.
    ///
    /// Tests against resolved layout frames, not presented frames, so a tap
    /// during an animation lands on the node's destination.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<NodeId> {
        let mut best: Option<(usize, i32)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if filter.visible_only && !node.local.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            if !node.frame.contains(pt) {
                continue;
            }
            match best {
                Some((_, z_best)) if z_best >= node.z_index => {}
                _ => best = Some((i, node.z_index)),
            }
        }
        best.map(|(i, _)| self.id_at(i))
    }

    // --- internals ---

    fn resolve(&self, anchor: TopAnchor) -> f64 {
        match anchor.target {
            AnchorTarget::SurfaceTop => self.bounds.y0,
            AnchorTarget::SurfaceBottom => self.bounds.y1,
            AnchorTarget::NodeTop(target) => self.nodes[target.idx()].frame.y0,
        }
    }

    fn take_front_z(&mut self) -> i32 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "A surface holds a handful of nodes; 32-bit slots are ample."
    )]
    fn id_at(&self, idx: usize) -> NodeId {
        NodeId::new(idx as u32, self.id)
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        if id.1 != self.id {
            return None;
        }
        self.nodes.get(id.idx())
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.1 != self.id {
            return None;
        }
        self.nodes.get_mut(id.idx())
    }

    /// Access a node mutably; panics if `id` is foreign.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("foreign NodeId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface::new(Rect::new(0.0, 0.0, 400.0, 800.0))
    }

    #[test]
    fn anchors_resolve_in_insertion_order() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(50.0)),
            ..Default::default()
        });
        let b = s.insert(LocalNode::default());
        s.set_top_anchor(b, Some(TopAnchor::below_node_top(a, 50.0)))
            .unwrap();
        let _ = s.commit();

        assert_eq!(s.frame(a), Some(Rect::new(0.0, 50.0, 400.0, 850.0)));
        assert_eq!(s.frame(b), Some(Rect::new(0.0, 100.0, 400.0, 900.0)));
    }

    #[test]
    fn bottom_anchor_peeks_above_the_edge() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::above_surface_bottom(50.0)),
            ..Default::default()
        });
        let _ = s.commit();
        assert_eq!(s.frame(a).map(|r| r.y0), Some(750.0));
    }

    #[test]
    fn unanchored_node_has_no_height() {
        let mut s = surface();
        let a = s.insert(LocalNode::default());
        let _ = s.commit();
        assert_eq!(s.frame(a).map(|r| r.height()), Some(0.0));
    }

    #[test]
    fn forward_and_self_references_are_rejected() {
        let mut s = surface();
        let a = s.insert(LocalNode::default());
        let b = s.insert(LocalNode::default());
        assert_eq!(
            s.set_top_anchor(a, Some(TopAnchor::below_node_top(b, 10.0))),
            Err(AnchorError::ForwardReference { node: a, target: b })
        );
        assert_eq!(
            s.set_top_anchor(a, Some(TopAnchor::below_node_top(a, 10.0))),
            Err(AnchorError::ForwardReference { node: a, target: a })
        );
    }

    #[test]
    fn foreign_ids_are_stale() {
        let mut s = surface();
        let mut other = surface();
        let foreign = other.insert(LocalNode::default());
        let a = s.insert(LocalNode::default());
        assert!(!s.contains(foreign));
        assert_eq!(
            s.set_top_anchor(a, Some(TopAnchor::below_node_top(foreign, 0.0))),
            Err(AnchorError::StaleNode(foreign))
        );
        assert_eq!(s.flags(foreign), None);
    }

    #[test]
    fn hit_test_prefers_front_node() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(0.0)),
            ..Default::default()
        });
        let b = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(100.0)),
            ..Default::default()
        });
        let _ = s.commit();

        assert_eq!(
            s.hit_test_point(Point::new(10.0, 150.0), QueryFilter::INTERACTIVE),
            Some(b),
            "newest node is in front"
        );
        assert_eq!(
            s.hit_test_point(Point::new(10.0, 50.0), QueryFilter::INTERACTIVE),
            Some(a)
        );

        s.bring_to_front(a);
        let _ = s.commit();
        assert_eq!(
            s.hit_test_point(Point::new(10.0, 150.0), QueryFilter::INTERACTIVE),
            Some(a)
        );
        assert_eq!(s.z_order(), [b, a]);
    }

    #[test]
    fn hidden_nodes_are_not_hit() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(0.0)),
            flags: NodeFlags::empty(),
        });
        let _ = s.commit();
        assert!(
            s.hit_test_point(Point::new(10.0, 10.0), QueryFilter::INTERACTIVE)
                .is_none()
        );
        s.set_flags(a, NodeFlags::VISIBLE);
        let _ = s.commit();
        assert!(
            s.hit_test_point(Point::new(10.0, 10.0), QueryFilter::INTERACTIVE)
                .is_none(),
            "visible but not pickable"
        );
        assert_eq!(
            s.hit_test_point(Point::new(10.0, 10.0), QueryFilter::default()),
            Some(a)
        );
    }

    #[test]
    fn moving_a_visible_node_reports_damage() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::above_surface_bottom(50.0)),
            ..Default::default()
        });
        let first = s.commit();
        assert!(!first.is_empty(), "first appearance is damage");

        s.set_top_anchor(a, Some(TopAnchor::below_surface_top(50.0)))
            .unwrap();
        let dmg = s.commit();
        assert_eq!(dmg.dirty_rects.len(), 2, "old and new frames");
        assert_eq!(dmg.union_rect(), Some(Rect::new(0.0, 50.0, 400.0, 1550.0)));

        let idle = s.commit();
        assert!(idle.is_empty());
    }

    #[test]
    fn hiding_a_node_damages_its_old_frame() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(0.0)),
            ..Default::default()
        });
        assert_eq!(s.epoch(), 0);
        let _ = s.commit();
        assert_eq!(s.epoch(), 1);
        assert!(!s.needs_commit());
        s.set_flags(a, NodeFlags::empty());
        assert!(s.needs_commit());
        let dmg = s.commit();
        assert_eq!(s.epoch(), 2);
        assert_eq!(dmg.dirty_rects, [Rect::new(0.0, 0.0, 400.0, 800.0)]);
    }

    #[test]
    fn presented_frames_snap_on_commit() {
        let mut s = surface();
        let a = s.insert(LocalNode {
            top: Some(TopAnchor::below_surface_top(0.0)),
            ..Default::default()
        });
        let _ = s.commit();
        s.set_presented(a, Rect::new(0.0, 300.0, 400.0, 1100.0));
        assert_eq!(s.presented(a).map(|r| r.y0), Some(300.0));
        assert!(!s.take_damage().is_empty());
        let _ = s.commit();
        assert_eq!(s.presented(a), s.frame(a));
    }
}
