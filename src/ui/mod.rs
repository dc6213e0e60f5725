//! ui
//!
//! Output utilities for the CLI.

pub mod output;

pub use output::Verbosity;
