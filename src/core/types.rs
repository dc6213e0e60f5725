//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`VersionId`] - Validated version identifier
//! - [`LineageEdge`] - Directed (successor, predecessor) relationship
//!
//! # Validation
//!
//! A [`VersionId`] names on-disk artifacts (`snapshots/<id>.json`,
//! `deltas/<successor>#<predecessor>.json`), so construction rejects anything
//! that cannot safely appear in a file name or that would collide with the
//! `#` edge separator. Ordering between version ids is defined only by the
//! lineage graph, never lexically.
//!
//! # Examples
//!
//! ```
//! use langtrail::core::types::VersionId;
//!
//! let id = VersionId::new("b1.6-pre-trailer").unwrap();
//! assert_eq!(id.as_str(), "b1.6-pre-trailer");
//!
//! assert!(VersionId::new("").is_err());
//! assert!(VersionId::new("1.0#1.1").is_err());
//! assert!(VersionId::new("../escape").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid version id: {0}")]
    InvalidVersionId(String),
}

/// A validated version identifier.
///
/// Version ids are opaque tokens taken from the external manifest. They must
/// be usable verbatim as file-name stems:
/// - Cannot be empty, `.` or `..`
/// - Cannot contain `/`, `\`, or `#`
/// - Cannot contain ASCII control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionId(String);

impl VersionId {
    /// Create a new validated version id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVersionId` if the token cannot name an
    /// on-disk artifact.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidVersionId(
                "version id cannot be empty".into(),
            ));
        }
        if id == "." || id == ".." {
            return Err(TypeError::InvalidVersionId(format!(
                "version id cannot be '{id}'"
            )));
        }

        // '#' separates the two endpoints in delta file names
        const INVALID_CHARS: [char; 3] = ['/', '\\', '#'];
        for c in INVALID_CHARS {
            if id.contains(c) {
                return Err(TypeError::InvalidVersionId(format!(
                    "version id cannot contain '{c}'"
                )));
            }
        }

        if id.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidVersionId(
                "version id cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the version id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VersionId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionId> for String {
    fn from(value: VersionId) -> Self {
        value.0
    }
}

/// A directed lineage relationship between two versions.
///
/// The edge points from the newer version (`successor`) to the older one
/// (`predecessor`). Deltas are cached keyed by the literal pair, so two edges
/// are the same edge exactly when both endpoints match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageEdge {
    /// The newer version.
    pub successor: VersionId,
    /// The older version it descends from.
    pub predecessor: VersionId,
}

impl LineageEdge {
    /// Create an edge from successor to predecessor.
    pub fn new(successor: VersionId, predecessor: VersionId) -> Self {
        Self {
            successor,
            predecessor,
        }
    }

    /// File-name stem for the persisted delta of this edge.
    ///
    /// # Example
    ///
    /// ```
    /// use langtrail::core::types::{LineageEdge, VersionId};
    ///
    /// let edge = LineageEdge::new(
    ///     VersionId::new("b1.1_02").unwrap(),
    ///     VersionId::new("b1.1_01").unwrap(),
    /// );
    /// assert_eq!(edge.file_stem(), "b1.1_02#b1.1_01");
    /// ```
    pub fn file_stem(&self) -> String {
        format!("{}#{}", self.successor, self.predecessor)
    }
}

impl fmt::Display for LineageEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.successor, self.predecessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_version_ids() {
        for id in ["1.19.2", "b1.6-pre-trailer", "b1.2_02", "20w14infinite", "1.RV-Pre1"] {
            assert!(VersionId::new(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_empty_and_dot_ids() {
        assert!(VersionId::new("").is_err());
        assert!(VersionId::new(".").is_err());
        assert!(VersionId::new("..").is_err());
    }

    #[test]
    fn rejects_separator_characters() {
        assert!(VersionId::new("a/b").is_err());
        assert!(VersionId::new("a\\b").is_err());
        assert!(VersionId::new("a#b").is_err());
        assert!(VersionId::new("a\tb").is_err());
    }

    #[test]
    fn serde_round_trip_validates() {
        let id: VersionId = serde_json::from_str("\"b1.0\"").unwrap();
        assert_eq!(id.as_str(), "b1.0");

        let bad: Result<VersionId, _> = serde_json::from_str("\"a#b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn edge_file_stem_joins_with_hash() {
        let edge = LineageEdge::new(
            VersionId::new("1.0").unwrap(),
            VersionId::new("b1.9-pre6").unwrap(),
        );
        assert_eq!(edge.file_stem(), "1.0#b1.9-pre6");
        assert_eq!(edge.to_string(), "1.0 -> b1.9-pre6");
    }
}
