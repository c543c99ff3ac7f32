// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{ConnectionId, GroupBoxId, NodeId};

/// The shape drawn for a node, one Mermaid vertex kind each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Circle,
    Diamond,
    Hexagon,
    Stadium,
    Subroutine,
}

impl ShapeKind {
    /// Fixed nominal footprint used for every geometric computation.
    ///
    /// The resolver and the compiler both read this table; it is never derived
    /// from rendered sizes.
    pub fn footprint(self) -> Size {
        match self {
            Self::Rect | Self::Stadium | Self::Subroutine => Size::new(96.0, 48.0),
            Self::Circle | Self::Diamond => Size::new(64.0, 64.0),
            Self::Hexagon => Size::new(80.0, 48.0),
        }
    }

    /// Capitalized display name, used for default node labels (`Rect 3`).
    pub fn capitalized(self) -> &'static str {
        match self {
            Self::Rect => "Rect",
            Self::Circle => "Circle",
            Self::Diamond => "Diamond",
            Self::Hexagon => "Hexagon",
            Self::Stadium => "Stadium",
            Self::Subroutine => "Subroutine",
        }
    }
}

/// How a connection is stroked and terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Arrow,
    Line,
    Dotted,
}

/// Border style of a group box (rendering hint only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

/// The active editing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolMode {
    #[default]
    Select,
    Connect,
    GroupBox,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A single shape instance on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    shape: ShapeKind,
    position: Point,
    label: String,
    background_color: Option<String>,
    text_color: Option<String>,
    border_color: Option<String>,
    border_width: Option<u32>,
}

impl Node {
    pub fn new(id: NodeId, shape: ShapeKind, position: Point, label: impl Into<String>) -> Self {
        Self {
            id,
            shape,
            position,
            label: label.into(),
            background_color: None,
            text_color: None,
            border_color: None,
            border_width: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn set_background_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.background_color = color.map(Into::into);
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn set_text_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.text_color = color.map(Into::into);
    }

    pub fn border_color(&self) -> Option<&str> {
        self.border_color.as_deref()
    }

    pub fn set_border_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.border_color = color.map(Into::into);
    }

    pub fn border_width(&self) -> Option<u32> {
        self.border_width
    }

    pub fn set_border_width(&mut self, width: Option<u32>) {
        self.border_width = width;
    }

    /// Whether the node carries any style attribute the compiler must emit a
    /// `classDef` for.
    pub fn has_style(&self) -> bool {
        self.background_color.is_some()
            || self.text_color.is_some()
            || self.border_color.is_some()
            || self.border_width.is_some()
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    from_node_id: NodeId,
    to_node_id: NodeId,
    label: Option<String>,
    kind: LineKind,
    color: Option<String>,
}

impl Connection {
    pub fn new(id: ConnectionId, from_node_id: NodeId, to_node_id: NodeId) -> Self {
        Self {
            id,
            from_node_id,
            to_node_id,
            label: None,
            kind: LineKind::Arrow,
            color: None,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn from_node_id(&self) -> &NodeId {
        &self.from_node_id
    }

    pub fn to_node_id(&self) -> &NodeId {
        &self.to_node_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: LineKind) {
        self.kind = kind;
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.color = color.map(Into::into);
    }
}

/// A rectangular grouping region compiled to a Mermaid `subgraph`.
///
/// `parent_id` is decided once at creation and deliberately never recomputed
/// when either box is later moved or resized.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    id: GroupBoxId,
    position: Point,
    size: Size,
    label: String,
    border_style: BorderStyle,
    color: String,
    parent_id: Option<GroupBoxId>,
    z_index: u64,
}

impl GroupBox {
    pub fn new(id: GroupBoxId, position: Point, size: Size, label: impl Into<String>) -> Self {
        Self {
            id,
            position,
            size,
            label: label.into(),
            border_style: BorderStyle::Solid,
            color: "#666666".to_owned(),
            parent_id: None,
            z_index: 0,
        }
    }

    pub fn id(&self) -> &GroupBoxId {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn border_style(&self) -> BorderStyle {
        self.border_style
    }

    pub fn set_border_style(&mut self, style: BorderStyle) {
        self.border_style = style;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn parent_id(&self) -> Option<&GroupBoxId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<GroupBoxId>) {
        self.parent_id = parent_id;
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: u64) {
        self.z_index = z_index;
    }
}

/// One immutable value of the whole diagram; the unit of undo/redo.
///
/// Entity `Vec`s keep model order (creation order unless edited), which is
/// the order the compiler iterates. At most one of the three selection fields
/// is set at a time; the `select_*` methods keep that invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramModel {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    group_boxes: Vec<GroupBox>,
    selected_node_id: Option<NodeId>,
    selected_connection_id: Option<ConnectionId>,
    selected_group_box_id: Option<GroupBoxId>,
    mode: ToolMode,
}

impl DiagramModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut Vec<Connection> {
        &mut self.connections
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|conn| conn.id() == id)
    }

    pub fn connection_mut(&mut self, id: &ConnectionId) -> Option<&mut Connection> {
        self.connections.iter_mut().find(|conn| conn.id() == id)
    }

    pub fn group_boxes(&self) -> &[GroupBox] {
        &self.group_boxes
    }

    pub fn group_boxes_mut(&mut self) -> &mut Vec<GroupBox> {
        &mut self.group_boxes
    }

    pub fn group_box(&self, id: &GroupBoxId) -> Option<&GroupBox> {
        self.group_boxes.iter().find(|group| group.id() == id)
    }

    pub fn group_box_mut(&mut self, id: &GroupBoxId) -> Option<&mut GroupBox> {
        self.group_boxes.iter_mut().find(|group| group.id() == id)
    }

    pub fn max_box_z_index(&self) -> u64 {
        self.group_boxes
            .iter()
            .map(GroupBox::z_index)
            .max()
            .unwrap_or(0)
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.selected_node_id.as_ref()
    }

    pub fn selected_connection_id(&self) -> Option<&ConnectionId> {
        self.selected_connection_id.as_ref()
    }

    pub fn selected_group_box_id(&self) -> Option<&GroupBoxId> {
        self.selected_group_box_id.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selected_node_id.is_some()
            || self.selected_connection_id.is_some()
            || self.selected_group_box_id.is_some()
    }

    pub fn select_node(&mut self, id: Option<NodeId>) {
        self.selected_node_id = id;
        self.selected_connection_id = None;
        self.selected_group_box_id = None;
    }

    pub fn select_connection(&mut self, id: Option<ConnectionId>) {
        self.selected_connection_id = id;
        self.selected_node_id = None;
        self.selected_group_box_id = None;
    }

    pub fn select_group_box(&mut self, id: Option<GroupBoxId>) {
        self.selected_group_box_id = id;
        self.selected_node_id = None;
        self.selected_connection_id = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected_node_id = None;
        self.selected_connection_id = None;
        self.selected_group_box_id = None;
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramModel, Node, Point, ShapeKind, Size};
    use crate::model::ids::{ConnectionId, NodeId};
    use rstest::rstest;

    #[rstest]
    #[case(ShapeKind::Rect, 96.0, 48.0)]
    #[case(ShapeKind::Stadium, 96.0, 48.0)]
    #[case(ShapeKind::Subroutine, 96.0, 48.0)]
    #[case(ShapeKind::Circle, 64.0, 64.0)]
    #[case(ShapeKind::Diamond, 64.0, 64.0)]
    #[case(ShapeKind::Hexagon, 80.0, 48.0)]
    fn footprints_are_fixed(#[case] shape: ShapeKind, #[case] width: f64, #[case] height: f64) {
        assert_eq!(shape.footprint(), Size::new(width, height));
    }

    #[test]
    fn node_style_flag_covers_every_attribute() {
        let id = NodeId::new("node_1").expect("node id");
        let mut node = Node::new(id, ShapeKind::Rect, Point::new(0.0, 0.0), "Start");
        assert!(!node.has_style());

        node.set_border_width(Some(3));
        assert!(node.has_style());

        node.set_border_width(None);
        node.set_text_color(Some("#333333"));
        assert!(node.has_style());
    }

    #[test]
    fn selections_are_mutually_exclusive() {
        let mut model = DiagramModel::new();
        let node_id = NodeId::new("node_1").expect("node id");
        let conn_id = ConnectionId::new("connection_1").expect("connection id");

        model.select_node(Some(node_id.clone()));
        assert_eq!(model.selected_node_id(), Some(&node_id));

        model.select_connection(Some(conn_id.clone()));
        assert_eq!(model.selected_connection_id(), Some(&conn_id));
        assert_eq!(model.selected_node_id(), None);

        model.clear_selection();
        assert!(!model.has_selection());
    }
}
