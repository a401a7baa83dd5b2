//! Configuration types for catalog ingestion.
//!
//! [`CatalogConfig`] controls how raw product records are sanitized, how missing
//! ids are derived, and how large a catalog may grow. It is cheap to clone and
//! deserializes from JSON or YAML.
//!
//! ```rust
//! use catalog::CatalogConfig;
//!
//! let config = CatalogConfig {
//!     max_products: Some(5_000),
//!     ..CatalogConfig::default()
//! };
//! config.validate().expect("valid catalog config");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Runtime configuration for catalog ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Version of the ingestion rules; bump when normalization changes.
    ///
    /// Default: `1`
    pub version: u32,

    /// Namespace for deterministic product ids.
    ///
    /// Records without an id get `UUIDv5(id_namespace, name)`, so reloading the
    /// same catalog always yields the same ids.
    ///
    /// Default: [`Uuid::NAMESPACE_OID`]
    pub id_namespace: Uuid,

    /// Strip control characters from ids and tag strings before storing them.
    ///
    /// Default: `true`
    pub strip_control_chars: bool,

    /// Upper bound on the number of products a catalog may hold.
    ///
    /// Default: `None` (unbounded)
    pub max_products: Option<usize>,
}

/// Errors raised by [`CatalogConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("max_products must be greater than zero when set")]
    ZeroProductLimit,

    #[error("unsupported catalog config version {0}")]
    UnsupportedVersion(u32),
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: 1,
            id_namespace: Uuid::NAMESPACE_OID,
            strip_control_chars: true,
            max_products: None,
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.max_products == Some(0) {
            return Err(ConfigError::ZeroProductLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = CatalogConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.strip_control_chars);
        assert_eq!(cfg.id_namespace, Uuid::NAMESPACE_OID);
    }

    #[test]
    fn zero_product_limit_rejected() {
        let cfg = CatalogConfig {
            max_products: Some(0),
            ..CatalogConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroProductLimit));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: CatalogConfig =
            serde_json::from_str(r#"{"max_products": 250}"#).expect("config parses");
        assert_eq!(cfg.max_products, Some(250));
        assert_eq!(cfg.version, 1);
        assert!(cfg.strip_control_chars);
    }
}
