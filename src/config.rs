//! YAML configuration for `ledcat`.
//!
//! One file configures catalog loading, query limits, and session storage.
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "showroom"
//!
//! catalog:
//!   path: "catalog.json"          # built-in fixtures when absent
//!   max_products: 10000
//!   strip_control_chars: true
//!   id_namespace: "6ba7b812-9dad-11d1-80b4-00c04fd430c8"
//!
//! query:
//!   default_page_size: 12
//!   max_page_size: 100
//!
//! session:
//!   path: "ledcat-session.json"   # history and saved searches disabled when absent
//!   max_history: 20
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use catalog::CatalogConfig;
use query::QueryConfig;
use serde::{Deserialize, Serialize};
use session::SessionConfig;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedcatConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub catalog: CatalogYamlConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub session: SessionYamlConfig,
}

impl LedcatConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LedcatConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.catalog.validate()?;
        self.query
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("query: {err}")))?;
        self.session.validate()?;
        Ok(())
    }

    /// Ingestion settings for the configured catalog.
    pub fn catalog_config(&self) -> Result<CatalogConfig, ConfigLoadError> {
        self.catalog.to_catalog_config()
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_history: self.session.max_history,
        }
    }
}

impl Default for LedcatConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            catalog: CatalogYamlConfig::default(),
            query: QueryConfig::default(),
            session: SessionYamlConfig::default(),
        }
    }
}

/// Catalog section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogYamlConfig {
    /// JSON catalog file; the built-in fixture catalog is used when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub max_products: Option<usize>,

    #[serde(default = "true_value")]
    pub strip_control_chars: bool,

    /// UUID namespace for ids derived from product names.
    #[serde(default)]
    pub id_namespace: Option<String>,
}

impl CatalogYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_catalog_config()?
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("catalog: {err}")))
    }

    fn to_catalog_config(&self) -> Result<CatalogConfig, ConfigLoadError> {
        let defaults = CatalogConfig::default();
        let id_namespace = match &self.id_namespace {
            None => defaults.id_namespace,
            Some(raw) => Uuid::parse_str(raw).map_err(|err| {
                ConfigLoadError::Validation(format!("catalog.id_namespace {raw:?}: {err}"))
            })?,
        };
        Ok(CatalogConfig {
            id_namespace,
            strip_control_chars: self.strip_control_chars,
            max_products: self.max_products,
            ..defaults
        })
    }
}

impl Default for CatalogYamlConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_products: None,
            strip_control_chars: true,
            id_namespace: None,
        }
    }
}

/// Session section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionYamlConfig {
    /// Session file; history and saved searches are disabled when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl SessionYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_history == 0 {
            return Err(ConfigLoadError::Validation(
                "session.max_history must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SessionYamlConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_history: default_max_history(),
        }
    }
}

fn true_value() -> bool {
    true
}
fn default_max_history() -> usize {
    SessionConfig::default().max_history
}
