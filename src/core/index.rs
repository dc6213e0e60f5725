//! core::index
//!
//! Reverse lineage index: predecessor -> successors.
//!
//! # Design
//!
//! The walk emits edges pointing backwards in time (successor ->
//! predecessor). Downstream tooling replays history forwards, so every edge
//! is inverted into this index. A predecessor may gain several successors
//! through the supplementary edge table (branch points); the index keeps all
//! of them in emission order rather than collapsing to the last writer, so
//! branch information survives a run.
//!
//! The index is rebuilt from scratch and persisted as a single full snapshot
//! on every run; it is never updated incrementally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{LineageEdge, VersionId};

/// Predecessor -> ordered successor list, built by inverting every edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReverseIndex {
    entries: BTreeMap<VersionId, Vec<VersionId>>,
}

impl ReverseIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edge, appending the successor under its predecessor.
    ///
    /// Recording the same edge twice is a no-op.
    pub fn record(&mut self, edge: &LineageEdge) {
        let successors = self.entries.entry(edge.predecessor.clone()).or_default();
        if !successors.contains(&edge.successor) {
            successors.push(edge.successor.clone());
        }
    }

    /// Build an index from a full edge sequence.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a LineageEdge>) -> Self {
        let mut index = Self::new();
        for edge in edges {
            index.record(edge);
        }
        index
    }

    /// Successors recorded for a predecessor, in emission order.
    pub fn successors(&self, predecessor: &VersionId) -> &[VersionId] {
        self.entries
            .get(predecessor)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of predecessors with at least one successor.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no edge has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (predecessor, successors) pairs in sorted predecessor order.
    pub fn iter(&self) -> impl Iterator<Item = (&VersionId, &Vec<VersionId>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(successor: &str, predecessor: &str) -> LineageEdge {
        LineageEdge::new(
            VersionId::new(successor).unwrap(),
            VersionId::new(predecessor).unwrap(),
        )
    }

    #[test]
    fn inverts_a_linear_chain() {
        let edges = vec![edge("1.2", "1.1"), edge("1.1", "1.0")];
        let index = ReverseIndex::from_edges(&edges);

        let v10 = VersionId::new("1.0").unwrap();
        let v11 = VersionId::new("1.1").unwrap();
        assert_eq!(index.successors(&v10), [VersionId::new("1.1").unwrap()]);
        assert_eq!(index.successors(&v11), [VersionId::new("1.2").unwrap()]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn branch_point_keeps_every_successor() {
        let edges = vec![edge("1.6", "1.5.1"), edge("2.0", "1.5.1")];
        let index = ReverseIndex::from_edges(&edges);

        let fork = VersionId::new("1.5.1").unwrap();
        let successors = index.successors(&fork);
        assert_eq!(successors.len(), 2);
        assert_eq!(successors[0].as_str(), "1.6");
        assert_eq!(successors[1].as_str(), "2.0");
    }

    #[test]
    fn duplicate_edges_are_recorded_once() {
        let mut index = ReverseIndex::new();
        index.record(&edge("1.1", "1.0"));
        index.record(&edge("1.1", "1.0"));

        let v10 = VersionId::new("1.0").unwrap();
        assert_eq!(index.successors(&v10).len(), 1);
    }

    #[test]
    fn unknown_predecessor_has_no_successors() {
        let index = ReverseIndex::new();
        let id = VersionId::new("1.0").unwrap();
        assert!(index.successors(&id).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn serializes_as_flat_object() {
        let index = ReverseIndex::from_edges(&[edge("1.1", "1.0")]);
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"1.0":["1.1"]}"#);
    }
}
