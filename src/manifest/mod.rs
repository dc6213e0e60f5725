//! manifest
//!
//! Abstraction for the remote version-manifest service.
//!
//! # Architecture
//!
//! All remote reads go through the [`ManifestSource`] trait:
//! - [`http::HttpManifestSource`] talks to the real endpoints
//! - [`mock::MockManifestSource`] serves fixtures for tests
//!
//! The trait is async because every operation involves network I/O; the
//! pipeline awaits each call to completion before the next (no fan-out).

pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpManifestSource;
pub use traits::{
    AssetIndexRef, AssetObject, ClientDownload, Downloads, ManifestError, ManifestSource,
    VersionDescriptor, VersionDetail, VersionManifest, VersionPackage,
};
