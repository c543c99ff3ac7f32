// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot files on disk.
//!
//! A snapshot file is a JSON document `{version, timestamp, diagramState}`.
//! Selections are transient and always nulled on save. Load rejects any
//! document lacking a `diagramState` field and leaves the caller's state
//! untouched on every error path, so a corrupt file can never be partially
//! applied.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    BorderStyle, Connection, ConnectionId, DiagramModel, GroupBox, GroupBoxId, IdError, LineKind,
    Node, NodeId, Point, ShapeKind, Size, ToolMode,
};

const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The document parsed but carries no `diagramState` member; it is not a
    /// snapshot and the load is abandoned.
    MissingDiagramState {
        path: PathBuf,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::MissingDiagramState { path } => {
                write!(f, "not a snapshot (missing diagramState) at {path:?}")
            }
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid {field} id {value:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::MissingDiagramState { .. } => None,
            Self::InvalidId { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable
    /// storage where possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// Save a snapshot, stamping it with the current wall-clock time.
pub fn save_snapshot(
    path: &Path,
    model: &DiagramModel,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    save_snapshot_at(path, model, durability, Utc::now())
}

/// Save with an explicit timestamp (the autosave loop and tests pass one in).
pub fn save_snapshot_at(
    path: &Path,
    model: &DiagramModel,
    durability: WriteDurability,
    timestamp: DateTime<Utc>,
) -> Result<(), StoreError> {
    let file = SnapshotJson {
        version: SNAPSHOT_VERSION.to_owned(),
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        diagram_state: Some(diagram_to_json(model)),
    };
    let mut contents = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    contents.push('\n');
    write_atomic(path, contents.as_bytes(), durability)
}

/// Load a snapshot. The current in-memory state is the caller's concern;
/// this function either returns a complete model or an error, never a
/// partial result.
pub fn load_snapshot(path: &Path) -> Result<DiagramModel, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SnapshotJson =
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let state = file
        .diagram_state
        .ok_or_else(|| StoreError::MissingDiagramState {
            path: path.to_path_buf(),
        })?;
    diagram_from_json(state)
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotJson {
    version: String,
    timestamp: String,
    #[serde(rename = "diagramState", default)]
    diagram_state: Option<DiagramStateJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DiagramStateJson {
    nodes: Vec<NodeJson>,
    connections: Vec<ConnectionJson>,
    #[serde(rename = "boundingBoxes")]
    bounding_boxes: Vec<BoundingBoxJson>,
    #[serde(rename = "selectedNode", default)]
    selected_node: Option<String>,
    #[serde(rename = "selectedConnection", default)]
    selected_connection: Option<String>,
    #[serde(rename = "selectedBoundingBox", default)]
    selected_bounding_box: Option<String>,
    mode: ToolModeJson,
}

#[derive(Debug, Serialize, Deserialize)]
struct PointJson {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SizeJson {
    width: f64,
    height: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeJson {
    id: String,
    #[serde(rename = "type")]
    kind: ShapeKindJson,
    position: PointJson,
    label: String,
    #[serde(
        rename = "backgroundColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    background_color: Option<String>,
    #[serde(rename = "textColor", default, skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(
        rename = "borderColor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    border_color: Option<String>,
    #[serde(
        rename = "borderWidth",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    border_width: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectionJson {
    id: String,
    from: String,
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(rename = "type")]
    kind: LineKindJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BoundingBoxJson {
    id: String,
    position: PointJson,
    size: SizeJson,
    label: String,
    style: BorderStyleJson,
    color: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(rename = "zIndex")]
    z_index: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ShapeKindJson {
    Rect,
    Circle,
    Diamond,
    Hexagon,
    Stadium,
    Subroutine,
}

impl From<ShapeKind> for ShapeKindJson {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rect => Self::Rect,
            ShapeKind::Circle => Self::Circle,
            ShapeKind::Diamond => Self::Diamond,
            ShapeKind::Hexagon => Self::Hexagon,
            ShapeKind::Stadium => Self::Stadium,
            ShapeKind::Subroutine => Self::Subroutine,
        }
    }
}

impl From<ShapeKindJson> for ShapeKind {
    fn from(kind: ShapeKindJson) -> Self {
        match kind {
            ShapeKindJson::Rect => Self::Rect,
            ShapeKindJson::Circle => Self::Circle,
            ShapeKindJson::Diamond => Self::Diamond,
            ShapeKindJson::Hexagon => Self::Hexagon,
            ShapeKindJson::Stadium => Self::Stadium,
            ShapeKindJson::Subroutine => Self::Subroutine,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LineKindJson {
    Arrow,
    Line,
    Dotted,
}

impl From<LineKind> for LineKindJson {
    fn from(kind: LineKind) -> Self {
        match kind {
            LineKind::Arrow => Self::Arrow,
            LineKind::Line => Self::Line,
            LineKind::Dotted => Self::Dotted,
        }
    }
}

impl From<LineKindJson> for LineKind {
    fn from(kind: LineKindJson) -> Self {
        match kind {
            LineKindJson::Arrow => Self::Arrow,
            LineKindJson::Line => Self::Line,
            LineKindJson::Dotted => Self::Dotted,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BorderStyleJson {
    Solid,
    Dashed,
    Dotted,
}

impl From<BorderStyle> for BorderStyleJson {
    fn from(style: BorderStyle) -> Self {
        match style {
            BorderStyle::Solid => Self::Solid,
            BorderStyle::Dashed => Self::Dashed,
            BorderStyle::Dotted => Self::Dotted,
        }
    }
}

impl From<BorderStyleJson> for BorderStyle {
    fn from(style: BorderStyleJson) -> Self {
        match style {
            BorderStyleJson::Solid => Self::Solid,
            BorderStyleJson::Dashed => Self::Dashed,
            BorderStyleJson::Dotted => Self::Dotted,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ToolModeJson {
    Select,
    Connect,
    BoundingBox,
}

impl From<ToolMode> for ToolModeJson {
    fn from(mode: ToolMode) -> Self {
        match mode {
            ToolMode::Select => Self::Select,
            ToolMode::Connect => Self::Connect,
            ToolMode::GroupBox => Self::BoundingBox,
        }
    }
}

impl From<ToolModeJson> for ToolMode {
    fn from(mode: ToolModeJson) -> Self {
        match mode {
            ToolModeJson::Select => Self::Select,
            ToolModeJson::Connect => Self::Connect,
            ToolModeJson::BoundingBox => Self::GroupBox,
        }
    }
}

fn diagram_to_json(model: &DiagramModel) -> DiagramStateJson {
    DiagramStateJson {
        nodes: model
            .nodes()
            .iter()
            .map(|node| NodeJson {
                id: node.id().to_string(),
                kind: node.shape().into(),
                position: PointJson {
                    x: node.position().x,
                    y: node.position().y,
                },
                label: node.label().to_owned(),
                background_color: node.background_color().map(str::to_owned),
                text_color: node.text_color().map(str::to_owned),
                border_color: node.border_color().map(str::to_owned),
                border_width: node.border_width(),
            })
            .collect(),
        connections: model
            .connections()
            .iter()
            .map(|conn| ConnectionJson {
                id: conn.id().to_string(),
                from: conn.from_node_id().to_string(),
                to: conn.to_node_id().to_string(),
                label: conn.label().map(str::to_owned),
                kind: conn.kind().into(),
                color: conn.color().map(str::to_owned),
            })
            .collect(),
        bounding_boxes: model
            .group_boxes()
            .iter()
            .map(|group| BoundingBoxJson {
                id: group.id().to_string(),
                position: PointJson {
                    x: group.position().x,
                    y: group.position().y,
                },
                size: SizeJson {
                    width: group.size().width,
                    height: group.size().height,
                },
                label: group.label().to_owned(),
                style: group.border_style().into(),
                color: group.color().to_owned(),
                parent_id: group.parent_id().map(ToString::to_string),
                z_index: group.z_index(),
            })
            .collect(),
        // selections are session state, never persisted
        selected_node: None,
        selected_connection: None,
        selected_bounding_box: None,
        mode: model.mode().into(),
    }
}

fn node_id(field: &'static str, value: String) -> Result<NodeId, StoreError> {
    NodeId::new(value.clone()).map_err(|source| StoreError::InvalidId {
        field,
        value,
        source,
    })
}

fn diagram_from_json(state: DiagramStateJson) -> Result<DiagramModel, StoreError> {
    let mut model = DiagramModel::new();

    for json in state.nodes {
        let id = node_id("node", json.id)?;
        let mut node = Node::new(
            id,
            json.kind.into(),
            Point::new(json.position.x, json.position.y),
            json.label,
        );
        node.set_background_color(json.background_color);
        node.set_text_color(json.text_color);
        node.set_border_color(json.border_color);
        node.set_border_width(json.border_width);
        model.nodes_mut().push(node);
    }

    for json in state.connections {
        let id =
            ConnectionId::new(json.id.clone()).map_err(|source| StoreError::InvalidId {
                field: "connection",
                value: json.id,
                source,
            })?;
        let from = node_id("connection.from", json.from)?;
        let to = node_id("connection.to", json.to)?;
        let mut conn = Connection::new(id, from, to);
        conn.set_label(json.label);
        conn.set_kind(json.kind.into());
        conn.set_color(json.color);
        model.connections_mut().push(conn);
    }

    for json in state.bounding_boxes {
        let id = GroupBoxId::new(json.id.clone()).map_err(|source| StoreError::InvalidId {
            field: "box",
            value: json.id,
            source,
        })?;
        let parent_id = json
            .parent_id
            .map(|value| {
                GroupBoxId::new(value.clone()).map_err(|source| StoreError::InvalidId {
                    field: "box.parentId",
                    value,
                    source,
                })
            })
            .transpose()?;
        let mut group = GroupBox::new(
            id,
            Point::new(json.position.x, json.position.y),
            Size::new(json.size.width, json.size.height),
            json.label,
        );
        group.set_border_style(json.style.into());
        group.set_color(json.color);
        group.set_parent_id(parent_id);
        group.set_z_index(json.z_index);
        model.group_boxes_mut().push(group);
    }

    if let Some(value) = state.selected_node {
        model.select_node(Some(node_id("selectedNode", value)?));
    } else if let Some(value) = state.selected_connection {
        let id = ConnectionId::new(value.clone()).map_err(|source| StoreError::InvalidId {
            field: "selectedConnection",
            value,
            source,
        })?;
        model.select_connection(Some(id));
    } else if let Some(value) = state.selected_bounding_box {
        let id = GroupBoxId::new(value.clone()).map_err(|source| StoreError::InvalidId {
            field: "selectedBoundingBox",
            value,
            source,
        })?;
        model.select_group_box(Some(id));
    }

    model.set_mode(state.mode.into());
    Ok(model)
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".galatea.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::{TimeZone, Utc};

    use super::{load_snapshot, save_snapshot_at, StoreError, WriteDurability};
    use crate::model::fixtures::{nested_boxes_diagram, nid};
    use crate::model::ToolMode;

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: std::path::PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!(
                "galatea-{prefix}-{}-{nanos}-{counter}",
                std::process::id()
            ));
            fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        fn path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn save_then_load_round_trips_the_model_with_selections_nulled() {
        let tmp = TempDir::new("snapshot-roundtrip");
        let path = tmp.path().join("diagram.json");

        let mut model = nested_boxes_diagram();
        model.set_mode(ToolMode::Connect);
        model.select_node(Some(nid("node_1")));

        let timestamp = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        save_snapshot_at(&path, &model, WriteDurability::BestEffort, timestamp).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.nodes(), model.nodes());
        assert_eq!(loaded.connections(), model.connections());
        assert_eq!(loaded.group_boxes(), model.group_boxes());
        assert_eq!(loaded.mode(), ToolMode::Connect);
        assert!(!loaded.has_selection(), "selections are never persisted");
    }

    #[test]
    fn snapshot_file_uses_the_documented_wire_names() {
        let tmp = TempDir::new("snapshot-wire");
        let path = tmp.path().join("diagram.json");

        let model = nested_boxes_diagram();
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        save_snapshot_at(&path, &model, WriteDurability::BestEffort, timestamp).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["timestamp"], "2026-08-25T12:00:00.000Z");
        let state = &json["diagramState"];
        assert_eq!(state["nodes"][0]["type"], "rect");
        assert_eq!(state["nodes"][0]["position"]["x"], 80.0);
        assert_eq!(state["connections"][0]["from"], "node_1");
        assert_eq!(state["boundingBoxes"][1]["parentId"], "box_1");
        assert_eq!(state["boundingBoxes"][1]["zIndex"], 2);
        assert_eq!(state["selectedNode"], serde_json::Value::Null);
        assert_eq!(state["mode"], "select");
        // absent style attributes are omitted entirely
        assert!(state["nodes"][0].get("backgroundColor").is_none());
    }

    #[test]
    fn load_rejects_a_document_without_diagram_state() {
        let tmp = TempDir::new("snapshot-missing-state");
        let path = tmp.path().join("other.json");
        fs::write(&path, "{\"version\": \"1.0\", \"timestamp\": \"x\"}\n").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, StoreError::MissingDiagramState { .. }));
    }

    #[test]
    fn load_rejects_unparseable_json() {
        let tmp = TempDir::new("snapshot-corrupt");
        let path = tmp.path().join("corrupt.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn load_accepts_a_persisted_selection() {
        let tmp = TempDir::new("snapshot-selection");
        let path = tmp.path().join("diagram.json");
        fs::write(
            &path,
            r#"{
  "version": "1.0",
  "timestamp": "2026-08-25T12:00:00.000Z",
  "diagramState": {
    "nodes": [
      {"id": "node_1", "type": "circle", "position": {"x": 1.0, "y": 2.0}, "label": "A"}
    ],
    "connections": [],
    "boundingBoxes": [],
    "selectedNode": "node_1",
    "selectedConnection": null,
    "selectedBoundingBox": null,
    "mode": "boundingBox"
  }
}
"#,
        )
        .unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.selected_node_id(), Some(&nid("node_1")));
        assert_eq!(loaded.mode(), ToolMode::GroupBox);
    }

    #[test]
    fn styled_entities_round_trip() {
        let tmp = TempDir::new("snapshot-style");
        let path = tmp.path().join("diagram.json");

        let mut model = nested_boxes_diagram();
        {
            let node = model.node_mut(&nid("node_1")).unwrap();
            node.set_background_color(Some("#ff0000"));
            node.set_border_width(Some(4));
        }

        let timestamp = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        save_snapshot_at(&path, &model, WriteDurability::Durable, timestamp).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        let node = loaded.node(&nid("node_1")).unwrap();
        assert_eq!(node.background_color(), Some("#ff0000"));
        assert_eq!(node.border_width(), Some(4));
    }

    #[test]
    fn save_replaces_an_existing_file_atomically() {
        let tmp = TempDir::new("snapshot-replace");
        let path = tmp.path().join("diagram.json");
        let timestamp = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();

        save_snapshot_at(
            &path,
            &nested_boxes_diagram(),
            WriteDurability::BestEffort,
            timestamp,
        )
        .unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let mut model = nested_boxes_diagram();
        model.nodes_mut().clear();
        save_snapshot_at(&path, &model, WriteDurability::BestEffort, timestamp).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_ne!(first, second);
        // no stray temp files survive a completed save
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".galatea.tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }
}
