// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session: history, id allocation, clipboard, and in-flight gestures.
//!
//! The [`Editor`] owns everything that is *not* part of a snapshot: the
//! undo/redo stacks, the id counters, the clipboard, and the transient state
//! of interactive gestures (a pending connect click, a box being drawn).
//! Gestures commit exactly one history entry when they complete and none when
//! they are abandoned.

use crate::format::mermaid;
use crate::history::History;
use crate::model::ids::numeric_suffix;
use crate::model::{DiagramModel, GroupBox, IdAllocator, Node, NodeId, Point, Size, ToolMode};
use crate::ops::{self, EditOp};

/// A value copy of the single copyable entity kinds.
///
/// Connections are deliberately not copyable; they only exist between live
/// nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardItem {
    Node(Node),
    GroupBox(GroupBox),
}

#[derive(Debug)]
pub struct Editor {
    history: History<DiagramModel>,
    ids: IdAllocator,
    clipboard: Option<ClipboardItem>,
    pending_connect: Option<NodeId>,
    box_draft: Option<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            history: History::new(DiagramModel::new()),
            ids: IdAllocator::new(),
            clipboard: None,
            pending_connect: None,
            box_draft: None,
        }
    }

    /// Like [`Editor::new`] but drops the oldest history entries beyond
    /// `max_past` undo steps.
    pub fn with_max_history(max_past: usize) -> Self {
        Self {
            history: History::new(DiagramModel::new()).with_max_past(max_past),
            ..Self::new()
        }
    }

    pub fn model(&self) -> &DiagramModel {
        self.history.present()
    }

    /// Apply one edit operation, recording a history entry only when the
    /// snapshot actually changed. No-op edits (missing ids, rejected gates)
    /// never pollute the undo stack.
    pub fn apply(&mut self, op: &EditOp) {
        let next = ops::apply(self.history.present(), &mut self.ids, op);
        if next != *self.model() {
            self.history.push(next);
        }
    }

    /// Handle a click on a node under the current tool.
    ///
    /// Select mode toggles the selection. Connect mode runs the two-click
    /// gesture: the first click arms a pending source, a second click on the
    /// same node cancels it, and a click on a different node completes the
    /// connection. The gesture never creates a self-loop.
    pub fn click_node(&mut self, id: &NodeId) {
        match self.model().mode() {
            ToolMode::Select => self.apply(&EditOp::SelectNode {
                id: Some(id.clone()),
            }),
            ToolMode::Connect => match self.pending_connect.take() {
                None => self.pending_connect = Some(id.clone()),
                Some(from) if &from == id => {}
                Some(from) => self.apply(&EditOp::CreateConnection {
                    from,
                    to: id.clone(),
                }),
            },
            ToolMode::GroupBox => {}
        }
    }

    /// The armed source of an in-flight connect gesture, if any.
    pub fn pending_connect(&self) -> Option<&NodeId> {
        self.pending_connect.as_ref()
    }

    /// Anchor a box-drawing drag at the given canvas point.
    pub fn begin_box_draw(&mut self, at: Point) {
        self.box_draft = Some(at);
    }

    /// Complete a box-drawing drag. The box spans the axis-aligned rectangle
    /// between the anchor and `at`; undersized rectangles are rejected by the
    /// operation and leave the model untouched.
    pub fn finish_box_draw(&mut self, at: Point) {
        let Some(anchor) = self.box_draft.take() else {
            return;
        };
        let position = Point::new(anchor.x.min(at.x), anchor.y.min(at.y));
        let size = Size::new((at.x - anchor.x).abs(), (at.y - anchor.y).abs());
        self.apply(&EditOp::CreateGroupBox { position, size });
    }

    /// Abandon any in-flight gesture without side effects.
    pub fn cancel_gesture(&mut self) {
        self.pending_connect = None;
        self.box_draft = None;
    }

    /// Copy the selected node or box to the clipboard. Connections and empty
    /// selections are ignored.
    pub fn copy(&mut self) {
        let model = self.model();
        let item = if let Some(id) = model.selected_node_id() {
            model.node(id).cloned().map(ClipboardItem::Node)
        } else if let Some(id) = model.selected_group_box_id() {
            model.group_box(id).cloned().map(ClipboardItem::GroupBox)
        } else {
            None
        };
        if item.is_some() {
            self.clipboard = item;
        }
    }

    pub fn paste(&mut self) {
        match self.clipboard.clone() {
            Some(ClipboardItem::Node(source)) => self.apply(&EditOp::PasteNode { source }),
            Some(ClipboardItem::GroupBox(source)) => {
                self.apply(&EditOp::PasteGroupBox { source })
            }
            None => {}
        }
    }

    pub fn clipboard(&self) -> Option<&ClipboardItem> {
        self.clipboard.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        self.cancel_gesture();
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.cancel_gesture();
        self.history.redo();
    }

    /// Compile the present snapshot to Mermaid text.
    pub fn compile(&self) -> String {
        mermaid::compile_diagram(self.model())
    }

    /// Adopt a loaded snapshot: history is reset (no undo across a load) and
    /// the id counters are re-seeded past every generated id in the snapshot,
    /// so fresh allocations cannot collide with persisted entities.
    pub fn load(&mut self, model: DiagramModel) {
        self.cancel_gesture();
        self.ids = seeded_allocator(&model);
        self.history.reset(model);
    }
}

fn high_water<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(numeric_suffix).max().unwrap_or(0)
}

fn seeded_allocator(model: &DiagramModel) -> IdAllocator {
    IdAllocator::seeded(
        high_water(model.nodes().iter().map(|node| node.id().as_str())),
        high_water(model.connections().iter().map(|conn| conn.id().as_str())),
        high_water(model.group_boxes().iter().map(|group| group.id().as_str())),
    )
}
