//! core::snapshot
//!
//! Flat localization tables and the legacy text format.
//!
//! # Snapshot
//!
//! A [`Snapshot`] is one version's localization table: a flat map from
//! translation key to translation string. Snapshots are immutable once
//! loaded; the diff engine consumes them read-only. Keys enumerate in sorted
//! order, which makes every derived artifact (snapshots, deltas, moved-key
//! lists) deterministic byte-for-byte.
//!
//! # Legacy text format
//!
//! Versions older than the JSON resource layout ship `key=value` lines:
//! - Lines without `=` are ignored
//! - Lines starting with `#` are ignored
//! - Only the first `=` splits key from value; later `=` belong to the value
//! - Trailing whitespace is trimmed from the value (leading is preserved)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One version's flat localization table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, String>,
}

impl Snapshot {
    /// Create an empty snapshot.
    ///
    /// An empty snapshot stands in for a version whose localization data is
    /// unavailable; diffing against it yields wholesale added/removed sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge another snapshot into this one; the other side wins collisions.
    ///
    /// Used for the oldest archive layout where the main table and the
    /// statistics table ship as separate files.
    pub fn merge(&mut self, other: Snapshot) {
        self.entries.extend(other.entries);
    }

    /// Iterate entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Iterate keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Parse the legacy `key=value` text format.
    ///
    /// # Example
    ///
    /// ```
    /// use langtrail::core::snapshot::Snapshot;
    ///
    /// let snap = Snapshot::from_legacy_text("tile.stone.name=Stone\n# comment\nbroken line\n");
    /// assert_eq!(snap.get("tile.stone.name"), Some("Stone"));
    /// assert_eq!(snap.len(), 1);
    /// ```
    pub fn from_legacy_text(content: &str) -> Self {
        let mut snapshot = Snapshot::new();

        for line in content.lines() {
            if line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            snapshot.insert(key, value.trim_end());
        }

        snapshot
    }

    /// Render the legacy `key=value` text format, one entry per line.
    pub fn to_legacy_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl FromIterator<(String, String)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Snapshot {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_text_ignores_comments_and_blank_lines() {
        let snap = Snapshot::from_legacy_text("# header\n\nkey.a=A\n# key.b=B\nkey.c=C");
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("key.a"), Some("A"));
        assert_eq!(snap.get("key.c"), Some("C"));
        assert!(!snap.contains_key("# key.b"));
    }

    #[test]
    fn legacy_text_ignores_lines_without_separator() {
        let snap = Snapshot::from_legacy_text("just some words\nkey=value");
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn legacy_text_splits_on_first_separator_only() {
        let snap = Snapshot::from_legacy_text("achievement.openInventory=Press E=open");
        assert_eq!(snap.get("achievement.openInventory"), Some("Press E=open"));
    }

    #[test]
    fn legacy_text_trims_trailing_whitespace_only() {
        let snap = Snapshot::from_legacy_text("key.a=  padded value \t\r");
        assert_eq!(snap.get("key.a"), Some("  padded value"));
    }

    #[test]
    fn legacy_text_round_trip() {
        let mut snap = Snapshot::new();
        snap.insert("b.key", "two");
        snap.insert("a.key", "one=1");
        let text = snap.to_legacy_text();
        assert_eq!(text, "a.key=one=1\nb.key=two");
        assert_eq!(Snapshot::from_legacy_text(&text), snap);
    }

    #[test]
    fn merge_prefers_incoming_entries() {
        let mut base = Snapshot::from([("shared", "old"), ("only.base", "x")]);
        let stats = Snapshot::from([("shared", "new"), ("only.stats", "y")]);
        base.merge(stats);
        assert_eq!(base.get("shared"), Some("new"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn json_round_trip_is_flat_object() {
        let snap = Snapshot::from([("a", "1"), ("b", "2")]);
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
