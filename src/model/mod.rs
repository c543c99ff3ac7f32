// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core diagram data model.
//!
//! A [`DiagramModel`] is pure data: nodes, connections, group boxes, plus the
//! selection and tool mode. Validity invariants are enforced by the edit
//! operations, never by the model itself.

pub mod diagram;
pub(crate) mod fixtures;
pub mod ids;

pub use diagram::{
    BorderStyle, Connection, DiagramModel, GroupBox, LineKind, Node, Point, ShapeKind, Size,
    ToolMode,
};
pub use ids::{ConnectionId, GroupBoxId, Id, IdAllocator, IdError, NodeId};
