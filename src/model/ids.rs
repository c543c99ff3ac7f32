// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable entity identifier embedded in diagram snapshots.
///
/// Ids are plain non-empty strings (`node_3`, `box_1`, ...). They are part of
/// the snapshot value, so they survive undo/redo unchanged; Mermaid-level
/// sanitization happens at compile time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectionIdTag {}
pub type ConnectionId = Id<ConnectionIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupBoxIdTag {}
pub type GroupBoxId = Id<GroupBoxIdTag>;

/// Session-scoped id allocation.
///
/// One monotone counter per entity kind. Counters are threaded through the
/// editor rather than hidden in module state, and they are never rewound:
/// deleting `node_3` and creating a new node still yields `node_4`, so ids
/// restored from history can never collide with freshly allocated ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next_node: u64,
    next_connection: u64,
    next_box: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counters past the given high-water marks.
    ///
    /// Used when adopting a loaded snapshot so new allocations cannot collide
    /// with persisted entities.
    pub fn seeded(node_ids: u64, connection_ids: u64, box_ids: u64) -> Self {
        Self {
            next_node: node_ids,
            next_connection: connection_ids,
            next_box: box_ids,
        }
    }

    /// Allocate the next node id. Returns the id and its sequence number
    /// (the sequence number feeds default labels like `Rect 3`).
    pub fn alloc_node(&mut self) -> (NodeId, u64) {
        self.next_node += 1;
        let id = Id::new(format!("node_{}", self.next_node)).expect("generated node id");
        (id, self.next_node)
    }

    pub fn alloc_connection(&mut self) -> ConnectionId {
        self.next_connection += 1;
        Id::new(format!("connection_{}", self.next_connection)).expect("generated connection id")
    }

    /// Allocate the next box id with its sequence number (for default labels).
    pub fn alloc_box(&mut self) -> (GroupBoxId, u64) {
        self.next_box += 1;
        let id = Id::new(format!("box_{}", self.next_box)).expect("generated box id");
        (id, self.next_box)
    }
}

/// Extract the numeric suffix of a generated id (`node_12` -> `12`).
pub(crate) fn numeric_suffix(id: &str) -> Option<u64> {
    let (_, suffix) = id.rsplit_once('_')?;
    suffix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{numeric_suffix, Id, IdAllocator, IdError};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn allocator_counts_per_kind_and_never_rewinds() {
        let mut ids = IdAllocator::new();
        let (node_a, seq_a) = ids.alloc_node();
        let (node_b, seq_b) = ids.alloc_node();
        assert_eq!(node_a.as_str(), "node_1");
        assert_eq!(node_b.as_str(), "node_2");
        assert_eq!((seq_a, seq_b), (1, 2));

        assert_eq!(ids.alloc_connection().as_str(), "connection_1");
        let (box_id, _) = ids.alloc_box();
        assert_eq!(box_id.as_str(), "box_1");

        // deletions never return counters; the next node is still node_3
        let (node_c, _) = ids.alloc_node();
        assert_eq!(node_c.as_str(), "node_3");
    }

    #[test]
    fn seeded_allocator_continues_past_existing_ids() {
        let mut ids = IdAllocator::seeded(7, 2, 0);
        assert_eq!(ids.alloc_node().0.as_str(), "node_8");
        assert_eq!(ids.alloc_connection().as_str(), "connection_3");
        assert_eq!(ids.alloc_box().0.as_str(), "box_1");
    }

    #[test]
    fn numeric_suffix_parses_generated_ids_only() {
        assert_eq!(numeric_suffix("node_12"), Some(12));
        assert_eq!(numeric_suffix("box_1"), Some(1));
        assert_eq!(numeric_suffix("custom"), None);
        assert_eq!(numeric_suffix("node_x"), None);
    }
}
