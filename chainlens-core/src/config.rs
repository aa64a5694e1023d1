//! Core configuration — explicit, injected, TOML-loadable.
//!
//! Nothing in this crate reads the process environment. The caller (CLI or
//! web layer) builds a `CoreConfig` however it likes and hands it to the
//! pipelines; tests inject whatever they need.

use crate::domain::NetworkRegistry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {message}")]
    Io { path: String, message: String },
    #[error("parse config: {0}")]
    Parse(String),
    #[error("load network registry: {0}")]
    Registry(String),
}

/// Everything a pipeline invocation needs to know about its environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Metrics warehouse base URL.
    #[serde(default = "d_warehouse_url")]
    pub warehouse_url: String,
    /// Warehouse API key. Only warehouse-backed pipelines require it, and
    /// they fail fast — before any network call — when it is absent.
    #[serde(default)]
    pub warehouse_api_key: Option<String>,
    /// DefiLlama base URL.
    #[serde(default = "d_llama_url")]
    pub llama_url: String,
    /// Per-request timeout. A hung provider call fails instead of blocking
    /// the invocation forever.
    #[serde(default = "d_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Warehouse page size.
    #[serde(default = "d_page_size")]
    pub page_size: u32,
    /// Page cap for the pagination merger.
    #[serde(default = "d_max_pages")]
    pub max_pages: u32,
    /// Optional registry file; the built-in default applies when absent.
    #[serde(default)]
    pub registry_path: Option<PathBuf>,
}

fn d_warehouse_url() -> String {
    "https://warehouse.chainlens.io".into()
}
fn d_llama_url() -> String {
    "https://api.llama.fi".into()
}
fn d_timeout_secs() -> u64 {
    30
}
fn d_page_size() -> u32 {
    100
}
fn d_max_pages() -> u32 {
    2
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            warehouse_url: d_warehouse_url(),
            warehouse_api_key: None,
            llama_url: d_llama_url(),
            request_timeout_secs: d_timeout_secs(),
            page_size: d_page_size(),
            max_pages: d_max_pages(),
            registry_path: None,
        }
    }
}

impl CoreConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string; every field has a default.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The network registry this deployment runs with.
    pub fn registry(&self) -> Result<NetworkRegistry, ConfigError> {
        match &self.registry_path {
            Some(path) => NetworkRegistry::from_file(path).map_err(ConfigError::Registry),
            None => Ok(NetworkRegistry::default_btc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = CoreConfig::from_toml("").unwrap();
        assert_eq!(cfg.max_pages, 2);
        assert_eq!(cfg.page_size, 100);
        assert!(cfg.warehouse_api_key.is_none());
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg = CoreConfig::from_toml(
            "warehouse_api_key = \"k-123\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();
        assert_eq!(cfg.warehouse_api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.page_size, 100);
    }

    #[test]
    fn default_registry_when_no_path() {
        let cfg = CoreConfig::default();
        let registry = cfg.registry().unwrap();
        assert_eq!(registry.anchor, "bitcoin");
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = CoreConfig::from_toml("page_size = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
