//! manifest::http
//!
//! HTTP manifest source backed by the public version-history service.
//!
//! # Design
//!
//! Three endpoints, configured through [`SourcesConfig`]:
//! - the manifest listing (one JSON document for all versions)
//! - the per-version detail template (`{}` replaced by the version id)
//! - the content-addressed resource host (`/<hash prefix>/<hash>`)
//!
//! All requests carry a crate User-Agent. Errors map to [`ManifestError`]:
//! 404 becomes `NotFound`, other non-success statuses `ServiceError`,
//! transport failures `Network`, and unparseable bodies `Malformed`. Some
//! historical version-package URLs answer with an HTML error page behind a
//! 200; a body starting with `<` is reported as `Malformed` so callers can
//! skip that version.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::traits::{
    AssetObject, ManifestError, ManifestSource, VersionDetail, VersionManifest, VersionPackage,
};
use crate::core::config::SourcesConfig;
use crate::core::types::VersionId;

/// User-Agent header value for service requests.
const USER_AGENT_VALUE: &str = "langtrail-cli";

/// Wire shape of an asset index document.
#[derive(Debug, Deserialize)]
struct AssetIndexDocument {
    objects: BTreeMap<String, AssetObject>,
}

/// HTTP-backed manifest source.
#[derive(Debug)]
pub struct HttpManifestSource {
    /// Shared HTTP client.
    client: Client,
    /// Endpoint configuration.
    sources: SourcesConfig,
}

impl HttpManifestSource {
    /// Create a source against the given endpoints.
    pub fn new(sources: SourcesConfig) -> Self {
        Self {
            client: Client::new(),
            sources,
        }
    }

    /// Create a source against the default public endpoints.
    pub fn with_defaults() -> Self {
        Self::new(SourcesConfig::default())
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// URL of the per-version detail document.
    fn detail_url(&self, id: &VersionId) -> String {
        self.sources.detail_url_template.replace("{}", id.as_str())
    }

    async fn get(&self, url: &str) -> Result<Response, ManifestError> {
        let response = self
            .client
            .get(url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| ManifestError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ManifestError::NotFound(url.to_string())),
            status if !status.is_success() => Err(ManifestError::ServiceError {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ManifestError> {
        let body = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| ManifestError::Network(e.to_string()))?;

        if body.trim_start().starts_with('<') {
            return Err(ManifestError::Malformed {
                url: url.to_string(),
                message: "service answered with an HTML page".to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| ManifestError::Malformed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    async fn manifest(&self) -> Result<VersionManifest, ManifestError> {
        self.get_json(&self.sources.manifest_url).await
    }

    async fn version_detail(&self, id: &VersionId) -> Result<VersionDetail, ManifestError> {
        self.get_json(&self.detail_url(id)).await
    }

    async fn version_package(&self, url: &str) -> Result<VersionPackage, ManifestError> {
        self.get_json(url).await
    }

    async fn asset_objects(
        &self,
        url: &str,
    ) -> Result<BTreeMap<String, AssetObject>, ManifestError> {
        let document: AssetIndexDocument = self.get_json(url).await?;
        Ok(document.objects)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ManifestError> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| ManifestError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn resource_url(&self, hash: &str) -> String {
        let prefix = hash.get(..2).unwrap_or(hash);
        format!("{}/{}/{}", self.sources.resources_url, prefix, hash)
    }
}
