//! # Catalog Query Engine (`query`)
//!
//! One pure function, [`search`], turns a product slice and a [`Query`] into a
//! [`SearchResult`]: free-text match, structured filters, a stable sort, and a
//! page. Every front-end (CLI, saved searches, history replay) goes through it
//! so filter semantics cannot drift between callers.
//!
//! ## Pipeline
//!
//! 1. **Text**: trimmed, lower-cased substring match over name, description,
//!    category, features, application, and specification values.
//! 2. **Filters** (all must pass): category equality, inclusive numeric ranges
//!    for pixel pitch/brightness/price, any-of applications, all-of features,
//!    size class.
//! 3. **Sort**: stable; ties keep catalog order in both directions.
//! 4. **Paginate**: `total_pages = ceil(matches / page_size)`; the requested page
//!    is clamped into `[1, max(1, total_pages)]`.
//!
//! The only failure is [`QueryError::InvalidQuery`]: a non-positive page size,
//! an inverted range, or a NaN/negative bound.
//!
//! ## Example
//!
//! ```
//! use catalog::fixtures::canonical_products;
//! use query::{search, Filters, Query, SortDirection, SortKey};
//!
//! let catalog = canonical_products();
//! let query = Query {
//!     filters: Filters {
//!         category: Some("Outdoor".into()),
//!         ..Filters::default()
//!     },
//!     sort_key: SortKey::Price,
//!     sort_direction: SortDirection::Ascending,
//!     ..Query::default()
//! };
//!
//! let result = search(&catalog, &query).expect("valid query");
//! assert_eq!(result.total_matches, 2);
//! assert_eq!(result.items[0].price, 600.0);
//! ```
mod config;
mod engine;
mod error;
mod params;
mod types;

pub use crate::config::{ConfigError, QueryConfig};
pub use crate::engine::search;
pub use crate::error::QueryError;
pub use crate::params::QueryParams;
pub use crate::types::{
    Filters, NumericRange, PageWindow, Query, SearchResult, SizeClass, SortDirection, SortKey,
    DEFAULT_PAGE_SIZE, MEDIUM_MAX_INCHES, SMALL_MAX_INCHES,
};
