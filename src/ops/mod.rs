// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edit operations for diagram snapshots.
//!
//! Every operation takes the current [`DiagramModel`] by reference and returns
//! a brand-new model; the input is never mutated. Lookup failures (a missing
//! id, an empty selection) degrade to a no-op rather than an error, so bad
//! user intent never fails fatally. Callers compare input and output to decide
//! whether to record a history entry.

use crate::geometry::{self, Rect};
use crate::model::{
    BorderStyle, Connection, ConnectionId, DiagramModel, GroupBox, GroupBoxId, IdAllocator,
    LineKind, Node, NodeId, Point, ShapeKind, Size, ToolMode,
};

/// Minimum group box edge length; smaller draw gestures are rejected.
pub const MIN_BOX_EDGE: f64 = 20.0;

/// Offset applied to a pasted entity relative to its source.
pub const PASTE_OFFSET: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    CreateNode {
        shape: ShapeKind,
        position: Point,
    },
    CreateConnection {
        from: NodeId,
        to: NodeId,
    },
    CreateGroupBox {
        position: Point,
        size: Size,
    },
    DeleteSelected,
    SelectNode {
        id: Option<NodeId>,
    },
    SelectConnection {
        id: Option<ConnectionId>,
    },
    SelectGroupBox {
        id: Option<GroupBoxId>,
    },
    SetMode {
        mode: ToolMode,
    },
    MoveNode {
        id: NodeId,
        position: Point,
    },
    SetNodeShape {
        id: NodeId,
        shape: ShapeKind,
    },
    SetNodeLabel {
        id: NodeId,
        label: String,
    },
    SetNodeStyle {
        id: NodeId,
        patch: NodeStylePatch,
    },
    SetConnectionKind {
        id: ConnectionId,
        kind: LineKind,
    },
    SetConnectionLabel {
        id: ConnectionId,
        label: Option<String>,
    },
    SetConnectionColor {
        id: ConnectionId,
        color: Option<String>,
    },
    SetBoxLabel {
        id: GroupBoxId,
        label: String,
    },
    SetBoxBorderStyle {
        id: GroupBoxId,
        style: BorderStyle,
    },
    SetBoxColor {
        id: GroupBoxId,
        color: String,
    },
    MoveBox {
        id: GroupBoxId,
        position: Point,
    },
    ResizeBox {
        id: GroupBoxId,
        position: Point,
        size: Size,
    },
    PasteNode {
        source: Node,
    },
    PasteGroupBox {
        source: GroupBox,
    },
    Clear,
}

/// Partial update of a node's style attributes.
///
/// Outer `None` leaves the attribute untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStylePatch {
    pub background_color: Option<Option<String>>,
    pub text_color: Option<Option<String>>,
    pub border_color: Option<Option<String>>,
    pub border_width: Option<Option<u32>>,
}

/// Apply one operation, producing the next snapshot.
///
/// `ids` is the per-session allocator; it advances only for operations that
/// create entities, and never rewinds (undo restores old snapshots, not old
/// counters, so restored ids can never collide with fresh ones).
pub fn apply(model: &DiagramModel, ids: &mut IdAllocator, op: &EditOp) -> DiagramModel {
    let mut next = model.clone();
    match op {
        EditOp::CreateNode { shape, position } => {
            let (id, seq) = ids.alloc_node();
            let label = format!("{} {seq}", shape.capitalized());
            next.nodes_mut().push(Node::new(id, *shape, *position, label));
        }
        EditOp::CreateConnection { from, to } => {
            if from == to || next.node(from).is_none() || next.node(to).is_none() {
                return next;
            }
            let id = ids.alloc_connection();
            next.connections_mut()
                .push(Connection::new(id, from.clone(), to.clone()));
        }
        EditOp::CreateGroupBox { position, size } => {
            if size.width < MIN_BOX_EDGE || size.height < MIN_BOX_EDGE {
                return next;
            }
            create_group_box(&mut next, ids, *position, *size);
        }
        EditOp::DeleteSelected => delete_selected(&mut next),
        EditOp::SelectNode { id } => {
            if matches!(id, Some(id) if next.node(id).is_none()) {
                return next;
            }
            let id = toggled(next.selected_node_id(), id.as_ref());
            next.select_node(id);
        }
        EditOp::SelectConnection { id } => {
            if matches!(id, Some(id) if next.connection(id).is_none()) {
                return next;
            }
            let id = toggled(next.selected_connection_id(), id.as_ref());
            next.select_connection(id);
        }
        EditOp::SelectGroupBox { id } => {
            if matches!(id, Some(id) if next.group_box(id).is_none()) {
                return next;
            }
            let id = toggled(next.selected_group_box_id(), id.as_ref());
            next.select_group_box(id);
        }
        EditOp::SetMode { mode } => {
            next.set_mode(*mode);
            next.clear_selection();
        }
        EditOp::MoveNode { id, position } => {
            if let Some(node) = next.node_mut(id) {
                node.set_position(*position);
            }
        }
        EditOp::SetNodeShape { id, shape } => {
            if let Some(node) = next.node_mut(id) {
                node.set_shape(*shape);
            }
        }
        EditOp::SetNodeLabel { id, label } => {
            if let Some(node) = next.node_mut(id) {
                node.set_label(label.clone());
            }
        }
        EditOp::SetNodeStyle { id, patch } => {
            if let Some(node) = next.node_mut(id) {
                apply_style_patch(node, patch);
            }
        }
        EditOp::SetConnectionKind { id, kind } => {
            if let Some(conn) = next.connection_mut(id) {
                conn.set_kind(*kind);
            }
        }
        EditOp::SetConnectionLabel { id, label } => {
            if let Some(conn) = next.connection_mut(id) {
                conn.set_label(label.clone());
            }
        }
        EditOp::SetConnectionColor { id, color } => {
            if let Some(conn) = next.connection_mut(id) {
                conn.set_color(color.clone());
            }
        }
        EditOp::SetBoxLabel { id, label } => {
            if let Some(group) = next.group_box_mut(id) {
                group.set_label(label.clone());
            }
        }
        EditOp::SetBoxBorderStyle { id, style } => {
            if let Some(group) = next.group_box_mut(id) {
                group.set_border_style(*style);
            }
        }
        EditOp::SetBoxColor { id, color } => {
            if let Some(group) = next.group_box_mut(id) {
                group.set_color(color.clone());
            }
        }
        EditOp::MoveBox { id, position } => {
            if let Some(group) = next.group_box_mut(id) {
                group.set_position(*position);
            }
        }
        EditOp::ResizeBox { id, position, size } => {
            if size.width < MIN_BOX_EDGE || size.height < MIN_BOX_EDGE {
                return next;
            }
            if let Some(group) = next.group_box_mut(id) {
                group.set_position(*position);
                group.set_size(*size);
            }
        }
        EditOp::PasteNode { source } => {
            let (id, _) = ids.alloc_node();
            let position = source.position();
            let mut pasted = Node::new(
                id,
                source.shape(),
                Point::new(position.x + PASTE_OFFSET, position.y + PASTE_OFFSET),
                source.label().to_owned(),
            );
            pasted.set_background_color(source.background_color().map(str::to_owned));
            pasted.set_text_color(source.text_color().map(str::to_owned));
            pasted.set_border_color(source.border_color().map(str::to_owned));
            pasted.set_border_width(source.border_width());
            next.nodes_mut().push(pasted);
        }
        EditOp::PasteGroupBox { source } => {
            let (id, _) = ids.alloc_box();
            let position = source.position();
            let mut pasted = GroupBox::new(
                id,
                Point::new(position.x + PASTE_OFFSET, position.y + PASTE_OFFSET),
                source.size(),
                source.label().to_owned(),
            );
            pasted.set_border_style(source.border_style());
            pasted.set_color(source.color().to_owned());
            // pasted boxes always land at top level
            pasted.set_parent_id(None);
            pasted.set_z_index(next.max_box_z_index() + 1);
            next.group_boxes_mut().push(pasted);
        }
        EditOp::Clear => {
            next = DiagramModel::new();
            next.set_mode(model.mode());
        }
    }
    next
}

fn toggled<T: Clone + PartialEq>(current: Option<&T>, requested: Option<&T>) -> Option<T> {
    match requested {
        Some(id) if current == Some(id) => None,
        other => other.cloned(),
    }
}

fn create_group_box(model: &mut DiagramModel, ids: &mut IdAllocator, position: Point, size: Size) {
    let rect = Rect::from_origin_size(position, size);
    let parent = geometry::creation_parent(model.group_boxes(), &rect)
        .map(|parent| (parent.id().clone(), parent.z_index()));

    let (id, seq) = ids.alloc_box();
    let label = match parent {
        Some(_) => format!("Sub-Group {seq}"),
        None => format!("Group {seq}"),
    };
    let mut group = GroupBox::new(id, position, size, label);
    match parent {
        Some((parent_id, parent_z)) => {
            group.set_parent_id(Some(parent_id));
            group.set_z_index(parent_z + 1);
            group.set_color("#4A90E2");
        }
        None => {
            group.set_z_index(model.max_box_z_index() + 1);
        }
    }
    model.group_boxes_mut().push(group);
}

fn delete_selected(model: &mut DiagramModel) {
    if let Some(id) = model.selected_node_id().cloned() {
        model.nodes_mut().retain(|node| node.id() != &id);
        // cascade: a connection never outlives either endpoint
        model
            .connections_mut()
            .retain(|conn| conn.from_node_id() != &id && conn.to_node_id() != &id);
        model.select_node(None);
    } else if let Some(id) = model.selected_connection_id().cloned() {
        model.connections_mut().retain(|conn| conn.id() != &id);
        model.select_connection(None);
    } else if let Some(id) = model.selected_group_box_id().cloned() {
        model.group_boxes_mut().retain(|group| group.id() != &id);
        model.select_group_box(None);
    }
}

fn apply_style_patch(node: &mut Node, patch: &NodeStylePatch) {
    if let Some(color) = &patch.background_color {
        node.set_background_color(color.clone());
    }
    if let Some(color) = &patch.text_color {
        node.set_text_color(color.clone());
    }
    if let Some(color) = &patch.border_color {
        node.set_border_color(color.clone());
    }
    if let Some(width) = patch.border_width {
        node.set_border_width(width);
    }
}
