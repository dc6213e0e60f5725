//! cli::commands::compare
//!
//! Diff two snapshot files from disk.
//!
//! # Example
//!
//! ```bash
//! langtrail compare snapshots/1.19.2.json snapshots/1.19.1.json
//! ```

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::core::diff::diff;
use crate::core::snapshot::Snapshot;

/// Diff two snapshot files and print the delta to stdout.
pub fn compare(current: &Path, predecessor: &Path) -> Result<()> {
    let current = load_snapshot(current)?;
    let predecessor = load_snapshot(predecessor)?;

    let delta = diff(&current, &predecessor);
    println!("{}", serde_json::to_string_pretty(&delta)?);
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("snapshot {} is not a flat JSON object", path.display()))
}
