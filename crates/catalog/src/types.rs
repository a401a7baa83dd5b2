//! Core data model types for the catalog crate.
//!
//! Raw records arrive in whatever shape the loader produced: ids as strings or
//! integers, measurements as numbers or unit-suffixed strings. Ingestion turns
//! them into the canonical, numeric [`Product`] the query engine works on.
//!
//! ```text
//! RawProduct
//! ├── id: Option<RawId>              "p4-outdoor" | 3
//! ├── pixel_pitch: Option<RawNumber> 4.0 | "4mm"
//! ├── brightness: Option<RawNumber>  6000 | "6000 nits"
//! ├── price: Option<RawNumber>       800 | "$800"
//! ├── size: Option<String>           "960x960mm" | "75-inch"
//! └── ...
//!
//!         ↓ ingest_product()
//!
//! Product
//! ├── id: ProductId                  sanitized or UUIDv5-derived
//! ├── pixel_pitch / brightness / price: f64
//! ├── size_inches: Option<f64>       diagonal, parsed from `size`
//! └── ...
//! ```
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A canonical catalog entry.
///
/// Products are immutable once ingested; the query engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Category tag, matched by exact equality (e.g. `"Outdoor"`).
    pub category: String,
    /// Pixel pitch in millimetres.
    pub pixel_pitch: f64,
    /// Brightness in nits.
    pub brightness: f64,
    /// Price in currency units.
    pub price: f64,
    pub application: Vec<String>,
    pub features: Vec<String>,
    pub resolution: String,
    /// Size as supplied, e.g. `"500x500mm"` or `"55-inch"`.
    pub size: String,
    /// Diagonal size in inches parsed from [`size`](Self::size), when recognizable.
    pub size_inches: Option<f64>,
    pub description: String,
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// Lower-cased haystack for free-text search.
    ///
    /// Joins name, description, category, features, application, and every
    /// specification value with single spaces.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(
            3 + self.features.len() + self.application.len() + self.specifications.len(),
        );
        parts.push(&self.name);
        parts.push(&self.description);
        parts.push(&self.category);
        parts.extend(self.features.iter().map(String::as_str));
        parts.extend(self.application.iter().map(String::as_str));
        parts.extend(self.specifications.values().map(String::as_str));
        parts.join(" ").to_lowercase()
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn has_application(&self, application: &str) -> bool {
        self.application.iter().any(|a| a == application)
    }
}

/// Product identifier as it appears in loader input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Text(String),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawId::Integer(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// A measurement as it appears in loader input: a bare number or a string with units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

/// A specification value as it appears in loader input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl RawScalar {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawScalar::Text(s) => s,
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Bool(b) => b.to_string(),
        }
    }
}

/// A product record before normalization.
///
/// Every field is optional; missing values fall back to empty strings, empty
/// collections, or zero during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub pixel_pitch: Option<RawNumber>,
    pub brightness: Option<RawNumber>,
    pub price: Option<RawNumber>,
    pub application: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub resolution: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<BTreeMap<String, RawScalar>>,
}
