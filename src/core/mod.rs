//! core
//!
//! Domain types and the diff/lineage algorithms.
//!
//! # Modules
//!
//! - [`types`] - Strong types ([`types::VersionId`], [`types::LineageEdge`])
//! - [`snapshot`] - Flat localization tables and the legacy text format
//! - [`diff`] - Structural diff between two snapshots
//! - [`lineage`] - Predecessor-chain walk with manual corrections
//! - [`index`] - Reverse lineage index (predecessor -> successors)
//! - [`config`] - User configuration schema and loading
//! - [`paths`] - Centralized cache-directory layout

pub mod config;
pub mod diff;
pub mod index;
pub mod lineage;
pub mod paths;
pub mod snapshot;
pub mod types;

pub use diff::Delta;
pub use index::ReverseIndex;
pub use lineage::LineageError;
pub use snapshot::Snapshot;
pub use types::{LineageEdge, TypeError, VersionId};
