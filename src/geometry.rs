// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Containment geometry.
//!
//! Nodes have fixed nominal footprints (see [`ShapeKind::footprint`]); a node
//! belongs to a group box only when its footprint lies fully inside the box.
//! Overlapping and nested boxes are disambiguated by z-index: the deepest
//! (most recently nested) box wins and a node is assigned at most once.

use std::collections::BTreeMap;

use crate::model::{DiagramModel, GroupBox, GroupBoxId, Node, NodeId, Point, ShapeKind, Size};

/// node id -> id of the innermost box that contains it.
pub type ContainmentMap = BTreeMap<NodeId, GroupBoxId>;

/// An axis-aligned rectangle spanning `[x, x+width) x [y, y+height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Full containment: both corners of `other` inside the half-open bounds.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(Point::new(other.x, other.y))
            && self.contains_point(Point::new(other.x + other.width, other.y + other.height))
    }

    /// Strict containment (no shared edges), used for box parent resolution
    /// at creation time.
    pub fn strictly_contains(&self, other: &Rect) -> bool {
        other.x > self.x
            && other.y > self.y
            && other.x + other.width < self.x + self.width
            && other.y + other.height < self.y + self.height
    }
}

/// The rectangle a node occupies for containment purposes.
pub fn node_bounds(position: Point, shape: ShapeKind) -> Rect {
    Rect::from_origin_size(position, shape.footprint())
}

pub fn box_bounds(group: &GroupBox) -> Rect {
    Rect::from_origin_size(group.position(), group.size())
}

/// Whether `node` sits fully inside `group` (footprint containment, not mere
/// overlap).
pub fn node_inside_box(node: &Node, group: &GroupBox) -> bool {
    box_bounds(group).contains_rect(&node_bounds(node.position(), node.shape()))
}

/// Assign every node to its innermost enclosing box.
///
/// Boxes are visited by descending z-index so deeper boxes claim their nodes
/// first; a claimed node is never reassigned by a shallower box. Nodes outside
/// every box are absent from the map.
pub fn resolve_containment(model: &DiagramModel) -> ContainmentMap {
    let mut boxes: Vec<&GroupBox> = model.group_boxes().iter().collect();
    boxes.sort_by(|a, b| b.z_index().cmp(&a.z_index()));

    let mut owners = ContainmentMap::new();
    for group in boxes {
        for node in model.nodes() {
            if !owners.contains_key(node.id()) && node_inside_box(node, group) {
                owners.insert(node.id().clone(), group.id().clone());
            }
        }
    }
    owners
}

/// Find the parent for a box being created with the given rectangle: the
/// first existing box (model order) that strictly contains it. This is a
/// one-time decision; moving or resizing either box later never revisits it.
pub fn creation_parent<'a>(boxes: &'a [GroupBox], rect: &Rect) -> Option<&'a GroupBox> {
    boxes
        .iter()
        .find(|group| box_bounds(group).strictly_contains(rect))
}
