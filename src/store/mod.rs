// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagram snapshots on disk.
//!
//! One snapshot per JSON file; the same format serves explicit save/load and
//! the periodic autosave, which simply saves the latest committed snapshot.

pub mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot, save_snapshot_at, StoreError, WriteDurability};
