//! Error types produced by the catalog crate.
//!
//! Every failure while turning raw product records into a [`Catalog`](crate::Catalog)
//! surfaces as a [`CatalogError`]. Errors are typed, cloneable, and comparable so
//! loaders can match on them precisely and tests can assert on them directly.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`InvalidField`](CatalogError::InvalidField) | Validation | A numeric field could not be normalized |
//! | [`MissingIdentity`](CatalogError::MissingIdentity) | Validation | Record has neither an id nor a name |
//! | [`DuplicateId`](CatalogError::DuplicateId) | Validation | Two products share an id |
//! | [`TooManyProducts`](CatalogError::TooManyProducts) | Limits | Catalog exceeds `max_products` |
//! | [`Json`](CatalogError::Json) | Decoding | Catalog document is not valid JSON |
//! | [`Io`](CatalogError::Io) | I/O | Catalog file could not be read |
//!
//! ```rust
//! use catalog::CatalogError;
//!
//! let err = CatalogError::DuplicateId("p4-outdoor".into());
//! assert_eq!(err.to_string(), "duplicate product id: p4-outdoor");
//! assert!(err.is_client_error());
//! ```
use thiserror::Error;

/// Errors that can occur while ingesting or loading a catalog.
///
/// The enum is `#[non_exhaustive]`; callers should keep a catch-all arm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// A field carried a value that cannot be normalized into the canonical schema.
    ///
    /// Raised for numeric fields that are negative, non-finite, or have no
    /// leading number (e.g. `"bright"` for brightness).
    #[error("product {id}: invalid {field} value {value:?}")]
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
    },

    /// The record has no usable id and no name to derive one from.
    #[error("product record has neither an id nor a name")]
    MissingIdentity,

    /// Two records resolved to the same product id.
    #[error("duplicate product id: {0}")]
    DuplicateId(String),

    /// The catalog holds more products than the configured limit.
    #[error("catalog holds {count} products, limit is {limit}")]
    TooManyProducts { count: usize, limit: usize },

    /// The catalog document could not be decoded.
    #[error("catalog json error: {0}")]
    Json(String),

    /// The catalog file could not be read.
    #[error("catalog io error: {0}")]
    Io(String),
}

impl CatalogError {
    /// Returns true when the error stems from the supplied data rather than the environment.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Io(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_message_names_field_and_value() {
        let err = CatalogError::InvalidField {
            id: "p6-outdoor".into(),
            field: "brightness",
            value: "very bright".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("p6-outdoor"));
        assert!(msg.contains("brightness"));
        assert!(msg.contains("very bright"));
    }

    #[test]
    fn io_errors_are_not_client_errors() {
        let err: CatalogError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "catalog.json").into();
        assert!(!err.is_client_error());
        assert!(CatalogError::MissingIdentity.is_client_error());
    }
}
