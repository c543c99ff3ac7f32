// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ident::sanitize_ident;
use crate::geometry::{self, ContainmentMap};
use crate::model::{Connection, DiagramModel, GroupBox, GroupBoxId, LineKind, Node, ShapeKind};

const HEADER: &str = "graph TD\n";
const INDENT: &str = "    ";

/// The canned graph shown while the diagram has no nodes. Not an error: the
/// preview renderer always needs a syntactically valid document.
const EMPTY_PLACEHOLDER: &str =
    "graph TD\n    A[No nodes yet]\n    A --> B[Drag nodes from the palette]";

fn shape_delimiters(shape: ShapeKind) -> (&'static str, &'static str) {
    match shape {
        ShapeKind::Rect => ("[", "]"),
        ShapeKind::Circle => ("((", "))"),
        ShapeKind::Diamond => ("{", "}"),
        ShapeKind::Hexagon => ("{{", "}}"),
        ShapeKind::Stadium => ("([", "])"),
        ShapeKind::Subroutine => ("[[", "]]"),
    }
}

fn arrow_glyph(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Arrow => "-->",
        LineKind::Line => "---",
        LineKind::Dotted => "-..->",
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn push_node_statement(out: &mut String, node: &Node, level: usize) {
    let (open, close) = shape_delimiters(node.shape());
    push_indent(out, level);
    out.push_str(&sanitize_ident(node.id().as_str()));
    out.push_str(open);
    out.push_str(node.label());
    out.push_str(close);
    out.push('\n');
}

/// Emit the subgraph block for `group` and recurse into its children.
///
/// A node is printed at exactly one level: the one the resolver assigned it
/// to. A node sitting in a child box was claimed by the child (deeper boxes
/// resolve first), so it is never emitted twice.
fn push_box_block(
    out: &mut String,
    model: &DiagramModel,
    owners: &ContainmentMap,
    group: &GroupBox,
    level: usize,
) {
    push_indent(out, level);
    out.push_str("subgraph ");
    out.push_str(&sanitize_ident(group.id().as_str()));
    out.push_str(" [\"");
    out.push_str(group.label());
    out.push_str("\"]\n");

    for node in model.nodes() {
        if owners.get(node.id()) == Some(group.id()) {
            push_node_statement(out, node, level + 1);
        }
    }

    push_child_boxes(out, model, owners, Some(group.id()), level + 1);

    push_indent(out, level);
    out.push_str("end\n");
}

fn push_child_boxes(
    out: &mut String,
    model: &DiagramModel,
    owners: &ContainmentMap,
    parent: Option<&GroupBoxId>,
    level: usize,
) {
    let mut children: Vec<&GroupBox> = model
        .group_boxes()
        .iter()
        .filter(|group| group.parent_id() == parent)
        .collect();
    children.sort_by(|a, b| a.z_index().cmp(&b.z_index()));

    for group in children {
        push_box_block(out, model, owners, group, level);
    }
}

fn push_edge_statement(out: &mut String, connection: &Connection) {
    push_indent(out, 1);
    out.push_str(&sanitize_ident(connection.from_node_id().as_str()));
    out.push(' ');
    out.push_str(arrow_glyph(connection.kind()));
    if let Some(label) = connection.label().filter(|label| !label.is_empty()) {
        out.push('|');
        out.push_str(label);
        out.push('|');
    }
    out.push(' ');
    out.push_str(&sanitize_ident(connection.to_node_id().as_str()));
    out.push('\n');
}

fn style_attributes(node: &Node) -> String {
    let mut attrs = String::new();
    let mut push_attr = |attrs: &mut String, name: &str, value: &str| {
        if !attrs.is_empty() {
            attrs.push(',');
        }
        attrs.push_str(name);
        attrs.push(':');
        attrs.push_str(value);
    };

    if let Some(fill) = node.background_color() {
        push_attr(&mut attrs, "fill", fill);
    }
    if let Some(color) = node.text_color() {
        push_attr(&mut attrs, "color", color);
    }
    if let Some(stroke) = node.border_color() {
        push_attr(&mut attrs, "stroke", stroke);
    }
    if let Some(width) = node.border_width() {
        let mut buf = itoa::Buffer::new();
        let mut value = String::from(buf.format(width));
        value.push_str("px");
        push_attr(&mut attrs, "stroke-width", &value);
    }
    attrs
}

fn push_node_styles(out: &mut String, model: &DiagramModel) {
    let mut buf = itoa::Buffer::new();
    let mut style_index = 0usize;
    for node in model.nodes() {
        if !node.has_style() {
            continue;
        }
        let index = buf.format(style_index).to_owned();

        push_indent(out, 1);
        out.push_str("classDef style");
        out.push_str(&index);
        out.push(' ');
        out.push_str(&style_attributes(node));
        out.push('\n');

        push_indent(out, 1);
        out.push_str("class ");
        out.push_str(&sanitize_ident(node.id().as_str()));
        out.push_str(" style");
        out.push_str(&index);
        out.push('\n');

        style_index += 1;
    }
}

fn push_link_styles(out: &mut String, model: &DiagramModel) {
    let mut buf = itoa::Buffer::new();
    for (index, connection) in model.connections().iter().enumerate() {
        let Some(color) = connection.color() else {
            continue;
        };
        // link styles address edges by position in the full connection list,
        // so removing an earlier connection shifts every later index
        push_indent(out, 1);
        out.push_str("linkStyle ");
        out.push_str(buf.format(index));
        out.push_str(" stroke:");
        out.push_str(color);
        out.push('\n');
    }
}

/// Compile a diagram snapshot plus its containment resolution to Mermaid
/// `graph TD` text.
///
/// Pure and byte-deterministic: the same inputs always produce identical
/// output, which is what diffing and the snapshot tests rely on.
pub fn compile(model: &DiagramModel, owners: &ContainmentMap) -> String {
    if model.nodes().is_empty() {
        return EMPTY_PLACEHOLDER.to_owned();
    }

    let mut out = String::from(HEADER);

    for node in model.nodes() {
        if !owners.contains_key(node.id()) {
            push_node_statement(&mut out, node, 1);
        }
    }

    push_child_boxes(&mut out, model, owners, None, 1);

    for connection in model.connections() {
        push_edge_statement(&mut out, connection);
    }

    push_node_styles(&mut out, model);
    push_link_styles(&mut out, model);

    out
}

/// Resolve containment and compile in one step.
pub fn compile_diagram(model: &DiagramModel) -> String {
    compile(model, &geometry::resolve_containment(model))
}
