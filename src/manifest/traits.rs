//! manifest::traits
//!
//! Manifest source trait and wire types.
//!
//! # Design
//!
//! The manifest service publishes three document shapes:
//!
//! - the **manifest listing**: every known version with its type
//!   classification and a detail URL
//! - the **per-version detail**: an ordered predecessor list plus download
//!   and asset-index references
//! - the **version package**: the upstream launcher document a descriptor's
//!   `url` points at, carrying the asset-index reference used by the
//!   translation-assets stage
//!
//! Wire field names follow the service (`omniId`, `assetIndex`); Rust names
//! follow this crate.
//!
//! # Example
//!
//! ```ignore
//! use langtrail::manifest::{ManifestSource, ManifestError};
//!
//! async fn newest(source: &dyn ManifestSource) -> Result<String, ManifestError> {
//!     let manifest = source.manifest().await?;
//!     Ok(manifest.versions[0].version_id().to_string())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::types::VersionId;

/// Errors from manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The requested document was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("service error: {status} for {url}")]
    ServiceError {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The document did not parse as the expected shape.
    #[error("malformed document from {url}: {message}")]
    Malformed {
        /// Requested URL
        url: String,
        /// Parse failure detail
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

/// The manifest listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Known versions, newest first.
    pub versions: Vec<VersionDescriptor>,
}

/// One entry of the manifest listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Launcher-facing identifier.
    pub id: String,
    /// Disambiguated identifier covering re-used launcher ids; preferred
    /// when present.
    #[serde(rename = "omniId", default, skip_serializing_if = "Option::is_none")]
    pub omni_id: Option<String>,
    /// Type classification (`release`, `snapshot`, `old_beta`, `old_alpha`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Detail-document URL (the upstream version package).
    pub url: String,
}

impl VersionDescriptor {
    /// The identifier used for artifacts: the disambiguated id when the
    /// service provides one, otherwise the launcher id.
    pub fn version_id(&self) -> &str {
        self.omni_id.as_deref().unwrap_or(&self.id)
    }

    /// True for the pre-archive era that never shipped usable client data.
    pub fn is_old_alpha(&self) -> bool {
        self.kind == "old_alpha"
    }

    /// True for eras with launcher asset indexes (release and snapshot).
    pub fn has_asset_era(&self) -> bool {
        self.kind != "old_alpha" && self.kind != "old_beta"
    }
}

/// Per-version detail document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionDetail {
    /// Declared predecessors, most relevant first.
    #[serde(default)]
    pub previous: Vec<String>,
    /// Client/server download references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Downloads>,
}

impl VersionDetail {
    /// The client archive download, if this version shipped one.
    pub fn client_download(&self) -> Option<&ClientDownload> {
        self.downloads.as_ref().and_then(|d| d.client.as_ref())
    }
}

/// Download references of a version detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Downloads {
    /// The client archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientDownload>,
}

/// One downloadable artifact reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDownload {
    /// Direct download URL.
    pub url: String,
}

/// The upstream launcher document behind a descriptor's `url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionPackage {
    /// Asset-index reference, absent for the oldest versions.
    #[serde(
        rename = "assetIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_index: Option<AssetIndexRef>,
}

/// Reference to an asset index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetIndexRef {
    /// Index identifier (e.g. `1.19`, or the special `pre-1.6`).
    pub id: String,
    /// Content hash of the index document.
    pub sha1: String,
    /// Index document URL.
    pub url: String,
}

impl AssetIndexRef {
    /// Special index id for versions whose translations live inside the jar.
    pub const PRE_ASSETS_ID: &'static str = "pre-1.6";

    /// True when translations must be extracted from the client archive
    /// instead of downloaded from the resource host.
    pub fn is_pre_assets(&self) -> bool {
        self.id == Self::PRE_ASSETS_ID
    }

    /// Locator string recorded in the assets index for this reference.
    pub fn locator(&self) -> String {
        format!("{}/{}", self.id, self.sha1)
    }
}

/// One entry of an asset index's object table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetObject {
    /// Content hash addressing the object on the resource host.
    pub hash: String,
}

/// Remote manifest service.
///
/// Implementations must be safe to share across await points; the pipeline
/// holds one source for a whole run.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch the manifest listing.
    async fn manifest(&self) -> Result<VersionManifest, ManifestError>;

    /// Fetch the per-version detail document.
    async fn version_detail(&self, id: &VersionId) -> Result<VersionDetail, ManifestError>;

    /// Fetch the launcher version package behind a descriptor URL.
    ///
    /// Some historical descriptor URLs answer with an HTML error page; that
    /// surfaces as [`ManifestError::Malformed`] and callers may skip the
    /// version.
    async fn version_package(&self, url: &str) -> Result<VersionPackage, ManifestError>;

    /// Fetch an asset index's object table.
    async fn asset_objects(&self, url: &str)
        -> Result<BTreeMap<String, AssetObject>, ManifestError>;

    /// Download raw bytes (client archives, translation files, resources).
    async fn download(&self, url: &str) -> Result<Vec<u8>, ManifestError>;

    /// URL of a content-addressed resource on the resource host.
    fn resource_url(&self, hash: &str) -> String;
}
