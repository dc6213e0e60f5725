//! core::diff
//!
//! Structural diff between two localization snapshots.
//!
//! # Orientation
//!
//! A [`Delta`] is computed from the newer snapshot's point of view, walking
//! history backwards: `diff(current, predecessor)`.
//!
//! - `removed`: keys in `current` that the `predecessor` does not have
//! - `changed`: keys in both whose values differ (exact string inequality)
//! - `added`: keys in `predecessor` that `current` does not have
//! - `moved`: rename candidates - a removed key whose value exactly matches
//!   the value of one or more added keys
//!
//! # Determinism
//!
//! Snapshots enumerate keys in sorted order, so all four fields come out in
//! sorted order and serializing the same pair of snapshots twice yields
//! byte-identical output. Ambiguous renames (several added keys sharing the
//! removed value) are preserved as the full candidate list, never collapsed
//! to an arbitrary winner.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::snapshot::Snapshot;

/// Structured diff between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Keys present in current, absent from the predecessor.
    pub removed: Vec<String>,
    /// Keys present in both sides with differing values.
    pub changed: Vec<String>,
    /// Keys present in the predecessor, absent from current.
    pub added: Vec<String>,
    /// Removed key -> added keys in the predecessor carrying its exact value.
    pub moved: BTreeMap<String, Vec<String>>,
}

impl Delta {
    /// True if the two snapshots were identical.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.changed.is_empty()
            && self.added.is_empty()
            && self.moved.is_empty()
    }
}

/// Compute the delta between `current` and its `predecessor`.
///
/// Either side may be empty (version data unavailable); the non-empty side
/// then shows up wholesale as `removed` or `added`, with nothing `changed`
/// or `moved`.
///
/// # Example
///
/// ```
/// use langtrail::core::diff::diff;
/// use langtrail::core::snapshot::Snapshot;
///
/// let current = Snapshot::from([("a", "1"), ("b", "2")]);
/// let predecessor = Snapshot::from([("a", "1"), ("c", "2")]);
///
/// let delta = diff(&current, &predecessor);
/// assert_eq!(delta.removed, vec!["b"]);
/// assert_eq!(delta.added, vec!["c"]);
/// assert!(delta.changed.is_empty());
/// assert_eq!(delta.moved["b"], vec!["c"]);
/// ```
pub fn diff(current: &Snapshot, predecessor: &Snapshot) -> Delta {
    let removed: Vec<String> = current
        .keys()
        .filter(|key| !predecessor.contains_key(key))
        .cloned()
        .collect();

    let changed: Vec<String> = current
        .iter()
        .filter(|(key, value)| {
            predecessor
                .get(key)
                .is_some_and(|other| other != value.as_str())
        })
        .map(|(key, _)| key.clone())
        .collect();

    let added: Vec<String> = predecessor
        .keys()
        .filter(|key| !current.contains_key(key))
        .cloned()
        .collect();

    let added_set: BTreeSet<&str> = added.iter().map(String::as_str).collect();

    let mut moved = BTreeMap::new();
    for key in &removed {
        let value = current.get(key).unwrap_or_default();

        // Every added key carrying the exact value is a rename candidate,
        // in the predecessor's key enumeration order.
        let candidates: Vec<String> = predecessor
            .iter()
            .filter(|(other_key, other_value)| {
                other_value.as_str() == value && added_set.contains(other_key.as_str())
            })
            .map(|(other_key, _)| other_key.clone())
            .collect();

        if !candidates.is_empty() {
            moved.insert(key.clone(), candidates);
        }
    }

    Delta {
        removed,
        changed,
        added,
        moved,
    }
}
