// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::{Connection, DiagramModel, GroupBox, Node, Point, ShapeKind, Size};
use super::ids::{ConnectionId, GroupBoxId, NodeId};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn cid(value: &str) -> ConnectionId {
    ConnectionId::new(value).expect("connection id")
}

pub(crate) fn bid(value: &str) -> GroupBoxId {
    GroupBoxId::new(value).expect("box id")
}

/// A rect inside two nested boxes plus one standalone circle connected to it.
pub(crate) fn nested_boxes_diagram() -> DiagramModel {
    let mut model = DiagramModel::new();

    let mut outer = GroupBox::new(
        bid("box_1"),
        Point::new(0.0, 0.0),
        Size::new(400.0, 300.0),
        "Outer",
    );
    outer.set_z_index(1);

    let mut inner = GroupBox::new(
        bid("box_2"),
        Point::new(40.0, 40.0),
        Size::new(220.0, 160.0),
        "Inner",
    );
    inner.set_parent_id(Some(bid("box_1")));
    inner.set_z_index(2);

    model.group_boxes_mut().push(outer);
    model.group_boxes_mut().push(inner);

    model.nodes_mut().push(Node::new(
        nid("node_1"),
        ShapeKind::Rect,
        Point::new(80.0, 80.0),
        "Start",
    ));
    model.nodes_mut().push(Node::new(
        nid("node_2"),
        ShapeKind::Circle,
        Point::new(500.0, 60.0),
        "Done",
    ));

    model.connections_mut().push(Connection::new(
        cid("connection_1"),
        nid("node_1"),
        nid("node_2"),
    ));

    model
}
