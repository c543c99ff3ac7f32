// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Reduce a model id to a Mermaid-safe identifier.
///
/// Every character outside `[A-Za-z0-9]` is stripped; `node_3` becomes
/// `node3`. Applied to every id referenced in emitted text, never to labels.
pub fn sanitize_ident(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}
