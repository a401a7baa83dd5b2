//! LED Catalog Layer
//!
//! This is where product data enters the system. Loaders hand us raw records in
//! whatever shape they have (string ids or integer ids, `"1.25mm"` or `1.25`,
//! `"55-inch"` or `"500x500mm"`) and we hand back a [`Catalog`] of canonical,
//! numeric [`Product`]s the query engine can filter and sort without guessing.
//!
//! ## What we do here
//!
//! - **Normalize measurements** - pixel pitch, brightness, and price become `f64`
//!   regardless of unit suffixes, currency signs, or thousands separators.
//! - **Parse sizes** - size strings become a diagonal in inches for size classes.
//! - **Resolve ids** - integer ids become strings; missing ids are derived with
//!   UUIDv5 from the product name, so reloads are stable.
//! - **Enforce invariants** - ids are unique and the catalog respects `max_products`.
//! - **Log outcomes** - structured `tracing` events for every catalog load.
//!
//! ## Example
//!
//! ```
//! use catalog::{Catalog, CatalogConfig};
//!
//! let json = r#"[
//!     {"id": 1, "name": "P4 Outdoor", "category": "Outdoor", "pixelPitch": "4mm", "price": 800},
//!     {"name": "P6 Outdoor", "category": "Outdoor", "pixelPitch": 6, "price": "$600"}
//! ]"#;
//!
//! let catalog = Catalog::from_json_str(json, &CatalogConfig::default()).unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.products()[0].id.as_str(), "1");
//! assert_eq!(catalog.products()[1].price, 600.0);
//! ```
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod error;
pub mod fixtures;
mod normalize;
mod types;

use crate::normalize::{derive_product_id, normalize_measure, sanitize, sanitize_tags};

pub use crate::config::{CatalogConfig, ConfigError};
pub use crate::error::CatalogError;
pub use crate::normalize::{parse_measure, parse_size_inches};
pub use crate::types::{Product, ProductId, RawId, RawNumber, RawProduct, RawScalar};

/// Normalize a single raw record into a canonical [`Product`].
pub fn ingest_product(raw: RawProduct, cfg: &CatalogConfig) -> Result<Product, CatalogError> {
    let strip = cfg.strip_control_chars;
    let RawProduct {
        id,
        name,
        category,
        pixel_pitch,
        brightness,
        price,
        application,
        features,
        resolution,
        size,
        description,
        specifications,
    } = raw;

    let name = name.map(|n| sanitize(n, strip)).unwrap_or_default();
    let id = id
        .map(|raw_id| sanitize(raw_id.into_string(), strip))
        .filter(|id| !id.is_empty());
    let id = match (id, name.is_empty()) {
        (Some(id), _) => id,
        (None, false) => derive_product_id(cfg, &name),
        (None, true) => return Err(CatalogError::MissingIdentity),
    };

    let pixel_pitch = normalize_measure(&id, "pixelPitch", pixel_pitch)?;
    let brightness = normalize_measure(&id, "brightness", brightness)?;
    let price = normalize_measure(&id, "price", price)?;

    let size = size.map(|s| sanitize(s, strip)).unwrap_or_default();
    let size_inches = parse_size_inches(&size);

    let specifications = specifications
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.into_string()))
        .collect();

    Ok(Product {
        id: ProductId::new(id),
        name,
        category: category.map(|c| sanitize(c, strip)).unwrap_or_default(),
        pixel_pitch,
        brightness,
        price,
        application: sanitize_tags(application, strip),
        features: sanitize_tags(features, strip),
        resolution: resolution.unwrap_or_default(),
        size,
        size_inches,
        description: description.unwrap_or_default(),
        specifications,
    })
}

/// An ordered, read-only collection of products with unique ids.
///
/// Insertion order is the catalog's natural order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-canonical products, enforcing id uniqueness.
    pub fn from_products(
        products: Vec<Product>,
        cfg: &CatalogConfig,
    ) -> Result<Self, CatalogError> {
        if let Some(limit) = cfg.max_products {
            if products.len() > limit {
                return Err(CatalogError::TooManyProducts {
                    count: products.len(),
                    limit,
                });
            }
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.to_string()));
            }
        }

        Ok(Self { products })
    }

    /// Caller guarantees unique ids.
    pub(crate) fn from_trusted(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Normalize raw records and build a catalog from them.
    pub fn ingest(raw: Vec<RawProduct>, cfg: &CatalogConfig) -> Result<Self, CatalogError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "catalog.ingest", records = raw.len());
        let _guard = span.enter();

        let result = raw
            .into_iter()
            .map(|record| ingest_product(record, cfg))
            .collect::<Result<Vec<_>, _>>()
            .and_then(|products| Self::from_products(products, cfg));

        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(catalog) => info!(
                products = catalog.len(),
                elapsed_micros, "catalog_ingest_success"
            ),
            Err(err) => warn!(error = %err, elapsed_micros, "catalog_ingest_failure"),
        }
        result
    }

    /// Parse a JSON array of raw products.
    pub fn from_json_str(json: &str, cfg: &CatalogConfig) -> Result<Self, CatalogError> {
        let raw: Vec<RawProduct> = serde_json::from_str(json)?;
        Self::ingest(raw, cfg)
    }

    /// Parse a JSON array of raw products from a reader.
    pub fn from_json_reader<R: Read>(reader: R, cfg: &CatalogConfig) -> Result<Self, CatalogError> {
        let raw: Vec<RawProduct> = serde_json::from_reader(reader)?;
        Self::ingest(raw, cfg)
    }

    /// Load a JSON catalog file.
    pub fn from_path<P: AsRef<Path>>(path: P, cfg: &CatalogConfig) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::from_json_reader(BufReader::new(file), cfg)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl AsRef<[Product]> for Catalog {
    fn as_ref(&self) -> &[Product] {
        &self.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
