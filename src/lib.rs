//! Langtrail - localization history extraction and diffing for game clients
//!
//! Langtrail downloads historical client archives, extracts the localization
//! table shipped in each one, and computes structured diffs between
//! successive versions by walking the external version-history manifest.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to pipeline)
//! - [`pipeline`] - Orchestrates Fetch -> Extract -> Diff -> Assets stages
//! - [`core`] - Domain types, diff engine, lineage walk, reverse index
//! - [`manifest`] - Abstraction for the remote version manifest service
//! - [`archive`] - Localization extraction from client archives
//! - [`store`] - On-disk artifact cache (snapshots, deltas, indexes)
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! Langtrail maintains the following invariants:
//!
//! 1. The lineage walk terminates at the configured root or fails loudly
//! 2. A persisted delta is never recomputed for the same edge
//! 3. Artifacts are written atomically; a crashed run leaves no torn files
//! 4. Diff output is deterministic byte-for-byte for identical snapshots

pub mod archive;
pub mod cli;
pub mod core;
pub mod manifest;
pub mod pipeline;
pub mod store;
pub mod ui;
