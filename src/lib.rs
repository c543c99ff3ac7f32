// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea — visual flowchart editor core.
//!
//! Snapshot-based diagram model, undo/redo history, geometric containment
//! resolution, and deterministic Mermaid `graph TD` compilation. Rendering
//! and input handling are the embedding UI's concern; this crate owns the
//! state and the text.

pub mod editor;
pub mod format;
pub mod geometry;
pub mod history;
pub mod model;
pub mod ops;
pub mod store;
