//! Property-based tests for the diff engine.
//!
//! These tests use proptest to verify the algebraic invariants of the diff
//! across randomly generated snapshot pairs. Small key and value alphabets
//! force heavy overlap between the two sides, which is where the interesting
//! cases live.

use std::collections::BTreeSet;

use proptest::prelude::*;

use langtrail::core::diff::diff;
use langtrail::core::snapshot::Snapshot;

/// Strategy for snapshot keys: a small alphabet to force collisions.
fn key() -> impl Strategy<Value = String> {
    (0u8..10).prop_map(|n| format!("key.{n}"))
}

/// Strategy for values: even smaller, to force value-equality (moves).
fn value() -> impl Strategy<Value = String> {
    (0u8..4).prop_map(|n| format!("value-{n}"))
}

/// Strategy for whole snapshots.
fn snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map(key(), value(), 0..10)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    /// removed/added/changed are pairwise disjoint, and together with the
    /// unchanged common keys they cover the union of both key sets.
    #[test]
    fn partition_covers_key_union(current in snapshot(), predecessor in snapshot()) {
        let delta = diff(&current, &predecessor);

        let removed: BTreeSet<_> = delta.removed.iter().cloned().collect();
        let added: BTreeSet<_> = delta.added.iter().cloned().collect();
        let changed: BTreeSet<_> = delta.changed.iter().cloned().collect();

        prop_assert!(removed.is_disjoint(&added));
        prop_assert!(removed.is_disjoint(&changed));
        prop_assert!(added.is_disjoint(&changed));

        let unchanged: BTreeSet<String> = current
            .iter()
            .filter(|(k, v)| predecessor.get(k) == Some(v.as_str()))
            .map(|(k, _)| k.clone())
            .collect();

        let mut covered = BTreeSet::new();
        covered.extend(removed);
        covered.extend(added);
        covered.extend(changed);
        covered.extend(unchanged);

        let union: BTreeSet<String> = current
            .keys()
            .chain(predecessor.keys())
            .cloned()
            .collect();

        prop_assert_eq!(covered, union);
    }

    /// Swapping the arguments swaps removed and added and preserves changed;
    /// moved is directional and deliberately not compared.
    #[test]
    fn reversal_swaps_removed_and_added(current in snapshot(), predecessor in snapshot()) {
        let forward = diff(&current, &predecessor);
        let backward = diff(&predecessor, &current);

        prop_assert_eq!(&forward.removed, &backward.added);
        prop_assert_eq!(&forward.added, &backward.removed);
        prop_assert_eq!(&forward.changed, &backward.changed);
    }

    /// Every moved entry points from a removed key to added keys whose
    /// predecessor value equals the removed key's current value.
    #[test]
    fn moved_entries_are_consistent(current in snapshot(), predecessor in snapshot()) {
        let delta = diff(&current, &predecessor);

        let removed: BTreeSet<_> = delta.removed.iter().cloned().collect();
        let added: BTreeSet<_> = delta.added.iter().cloned().collect();

        for (from, targets) in &delta.moved {
            prop_assert!(removed.contains(from));
            prop_assert!(!targets.is_empty());

            let moved_value = current.get(from).unwrap();
            for target in targets {
                prop_assert!(added.contains(target));
                prop_assert_eq!(predecessor.get(target), Some(moved_value));
            }
        }
    }

    /// Diffing the same pair twice yields byte-identical serialized output.
    #[test]
    fn serialization_is_idempotent(current in snapshot(), predecessor in snapshot()) {
        let first = serde_json::to_vec_pretty(&diff(&current, &predecessor)).unwrap();
        let second = serde_json::to_vec_pretty(&diff(&current, &predecessor)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Diffing against the empty snapshot never produces changed or moved.
    #[test]
    fn empty_side_means_wholesale(current in snapshot()) {
        let empty = Snapshot::new();

        let against_empty = diff(&current, &empty);
        prop_assert!(against_empty.changed.is_empty());
        prop_assert!(against_empty.moved.is_empty());
        prop_assert!(against_empty.added.is_empty());
        prop_assert_eq!(against_empty.removed.len(), current.len());

        let from_empty = diff(&empty, &current);
        prop_assert!(from_empty.changed.is_empty());
        prop_assert!(from_empty.moved.is_empty());
        prop_assert!(from_empty.removed.is_empty());
        prop_assert_eq!(from_empty.added.len(), current.len());
    }
}
