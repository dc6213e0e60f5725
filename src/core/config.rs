//! core::config
//!
//! User configuration schema and loading.
//!
//! # Location
//!
//! In order of precedence:
//! 1. `--config <path>` on the command line
//! 2. `$LANGTRAIL_CONFIG` if set
//! 3. `~/.config/langtrail/config.toml`
//! 4. Built-in defaults
//!
//! A missing file at the default location is not an error; every field has a
//! default so an empty file is also valid.
//!
//! # Example
//!
//! ```toml
//! cache_dir = "/data/langtrail"
//! root_version = "b1.0"
//!
//! [sources]
//! manifest_url = "https://skyrising.github.io/mc-versions/version_manifest.json"
//! detail_url_template = "https://skyrising.github.io/mc-versions/version/{}.json"
//! resources_url = "https://resources.download.minecraft.net"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::{TypeError, VersionId};

/// Default manifest listing endpoint.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://skyrising.github.io/mc-versions/version_manifest.json";

/// Default per-version detail endpoint; `{}` is replaced by the version id.
pub const DEFAULT_DETAIL_URL_TEMPLATE: &str =
    "https://skyrising.github.io/mc-versions/version/{}.json";

/// Default content-addressed resource host.
pub const DEFAULT_RESOURCES_URL: &str = "https://resources.download.minecraft.net";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(#[from] TypeError),
}

/// Remote endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Manifest listing endpoint.
    pub manifest_url: String,
    /// Per-version detail endpoint with a `{}` placeholder.
    pub detail_url_template: String,
    /// Content-addressed resource host.
    pub resources_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            detail_url_template: DEFAULT_DETAIL_URL_TEMPLATE.to_string(),
            resources_url: DEFAULT_RESOURCES_URL.to_string(),
        }
    }
}

/// User configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Artifact cache root. Defaults to `~/.cache/langtrail`, falling back
    /// to `./langtrail-cache` when no cache directory can be determined.
    pub cache_dir: Option<PathBuf>,

    /// Terminal root of the lineage walk. Defaults to the built-in root.
    pub root_version: Option<String>,

    /// Remote endpoint settings.
    pub sources: SourcesConfig,
}

impl Config {
    /// Load configuration with the documented precedence.
    ///
    /// # Errors
    ///
    /// An explicitly named file (flag or environment) must exist and parse;
    /// the default location is allowed to be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        if let Some(path) = std::env::var_os("LANGTRAIL_CONFIG") {
            return Self::load_file(Path::new(&path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("langtrail").join("config.toml");
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and parse one file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parsed values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root_version {
            VersionId::new(root.clone())?;
        }
        Ok(())
    }

    /// Resolve the effective cache root.
    pub fn cache_root(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        dirs::cache_dir()
            .map(|d| d.join("langtrail"))
            .unwrap_or_else(|| PathBuf::from("langtrail-cache"))
    }

    /// Resolve the effective walk root.
    pub fn root_version(&self) -> VersionId {
        match &self.root_version {
            // Validated in `validate`; default is a known-good constant.
            Some(root) => VersionId::new(root.clone()).unwrap(),
            None => VersionId::new(super::lineage::ROOT_VERSION).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_builtin_endpoints() {
        let config = Config::default();
        assert_eq!(config.sources.manifest_url, DEFAULT_MANIFEST_URL);
        assert_eq!(config.root_version().as_str(), "b1.0");
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let config: Config = toml::from_str(
            r#"
            cache_dir = "/data/cache"
            root_version = "a1.0.4"
            "#,
        )
        .unwrap();
        assert_eq!(config.cache_root(), PathBuf::from("/data/cache"));
        assert_eq!(config.root_version().as_str(), "a1.0.4");
        assert_eq!(config.sources, SourcesConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = toml::from_str("unknown_field = true");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_root_version_fails_validation() {
        // Parsing succeeds (plain string field); validation rejects it.
        let config = Config {
            root_version: Some("a#b".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
