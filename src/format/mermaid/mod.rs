// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid `graph TD` emission.

pub mod flowchart;
pub mod ident;

pub use flowchart::{compile, compile_diagram};
pub use ident::sanitize_ident;
