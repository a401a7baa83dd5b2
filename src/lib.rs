//! Workspace umbrella crate for the LED display catalog (`ledcat`).
//!
//! This crate ties catalog ingestion, the query engine, and session state
//! together behind a single [`CatalogService`] so front-ends share one catalog
//! and one set of filter semantics.

pub use catalog::{
    Catalog, CatalogConfig, CatalogError, Product, ProductId, RawProduct, fixtures,
    ingest_product, parse_measure, parse_size_inches,
};
pub use query::{
    Filters, NumericRange, PageWindow, Query, QueryConfig, QueryError, QueryParams,
    SearchResult, SizeClass, SortDirection, SortKey, search,
};
pub use session::{
    Favorite, Favorites, HistoryEntry, SavedSearch, SavedSearches, SearchHistory, SearchKind,
    SessionConfig, SessionError, SessionState, SessionStore, export_csv,
};

pub mod cli;
pub mod config;
mod logging;

pub use crate::config::{ConfigLoadError, LedcatConfig};
pub use crate::logging::init_logging;

use std::error::Error as StdError;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by [`CatalogService`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("search failed: {0}")]
    Query(#[from] QueryError),

    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),
}

impl ServiceError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            ServiceError::Query(err) => err.http_status_code(),
            ServiceError::Catalog(err) if err.is_client_error() => 422,
            ServiceError::Catalog(_) => 500,
        }
    }
}

/// Metrics observer for catalog searches.
pub trait SearchMetrics: Send + Sync {
    /// `result` carries the total match count on success.
    fn record_search(&self, latency: Duration, result: Result<usize, QueryError>);
}

/// Install or clear the global search metrics recorder.
pub fn set_search_metrics(recorder: Option<Arc<dyn SearchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn SearchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn SearchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn SearchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn SearchMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_search(self, result: Result<usize, QueryError>) {
        self.recorder.record_search(self.start.elapsed(), result);
    }
}

/// Shared handle to the current catalog plus the query limits applied to it.
///
/// Clones share the same catalog. [`refresh`](Self::refresh) swaps the catalog
/// for every clone; searches already running keep the snapshot they started with.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<RwLock<Arc<Catalog>>>,
    query_cfg: QueryConfig,
}

impl CatalogService {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, QueryConfig::default())
    }

    pub fn with_config(catalog: Catalog, query_cfg: QueryConfig) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            query_cfg,
        }
    }

    /// Build a service from a loaded config: the configured catalog file, or
    /// the built-in fixtures when none is set.
    pub fn from_config(cfg: &LedcatConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let catalog_cfg = cfg.catalog_config()?;
        let catalog = match &cfg.catalog.path {
            Some(path) => Catalog::from_path(path, &catalog_cfg)?,
            None => fixtures::canonical_catalog(),
        };
        Ok(Self::with_config(catalog, cfg.query))
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query_cfg
    }

    /// The catalog as of now.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self
            .catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the catalog for all holders of this service.
    pub fn refresh(&self, catalog: Catalog) {
        let products = catalog.len();
        let mut guard = self
            .catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(catalog);
        info!(products, "catalog_refreshed");
    }

    /// Reload the catalog from a JSON file. The current catalog is kept on failure.
    pub fn reload_from_path<P: AsRef<Path>>(
        &self,
        path: P,
        cfg: &CatalogConfig,
    ) -> Result<(), ServiceError> {
        let catalog = Catalog::from_path(path.as_ref(), cfg).inspect_err(|err| {
            warn!(path = %path.as_ref().display(), error = %err, "catalog_reload_failure");
        })?;
        self.refresh(catalog);
        Ok(())
    }

    pub fn search(&self, query: &Query) -> Result<SearchResult, ServiceError> {
        let metrics = MetricsSpan::start();
        let catalog = self.snapshot();

        let result = self
            .query_cfg
            .check(query)
            .and_then(|()| search(catalog.products(), query));

        if let Some(span) = metrics {
            span.record_search(
                result
                    .as_ref()
                    .map(|r| r.total_matches)
                    .map_err(QueryError::clone),
            );
        }
        match &result {
            Ok(found) => debug!(
                total_matches = found.total_matches,
                page = found.page,
                "service_search_success"
            ),
            Err(err) => debug!(error = %err, "service_search_failure"),
        }
        result.map_err(ServiceError::from)
    }

    /// Parse UI string parameters, applying the configured default page size.
    pub fn search_params(&self, params: QueryParams) -> Result<SearchResult, ServiceError> {
        let query = params.into_query(self.query_cfg.default_page_size())?;
        self.search(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Result<usize, QueryError>>>,
    }

    impl SearchMetrics for Recorder {
        fn record_search(&self, _latency: Duration, result: Result<usize, QueryError>) {
            self.calls.lock().unwrap().push(result);
        }
    }

    #[test]
    fn service_searches_the_current_snapshot() {
        let service = CatalogService::new(fixtures::canonical_catalog());
        let before = service.snapshot();
        let result = service.search(&Query::text("outdoor")).unwrap();
        assert_eq!(result.total_matches, 2);

        let single = Catalog::from_json_str(
            r#"[{"id": "x", "name": "Solo Outdoor Wall"}]"#,
            &CatalogConfig::default(),
        )
        .unwrap();
        service.clone().refresh(single);

        let result = service.search(&Query::text("outdoor")).unwrap();
        assert_eq!(result.total_matches, 1);
        assert_eq!(before.len(), 6, "old snapshot is untouched");
    }

    #[test]
    fn params_use_the_configured_default_page_size() {
        let service = CatalogService::with_config(
            fixtures::canonical_catalog(),
            QueryConfig {
                default_page_size: 4,
                max_page_size: 10,
            },
        );
        let result = service.search_params(QueryParams::default()).unwrap();
        assert_eq!(result.items.len(), 4);
        assert_eq!(result.total_pages, 2);

        let too_big = QueryParams {
            page_size: Some("11".into()),
            ..QueryParams::default()
        };
        let err = service.search_params(too_big).unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn failed_reload_keeps_the_catalog() {
        let service = CatalogService::new(fixtures::canonical_catalog());
        let err = service
            .reload_from_path("/nonexistent/catalog.json", &CatalogConfig::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Catalog(CatalogError::Io(_))));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(service.snapshot().len(), 6);
    }

    #[test]
    fn service_errors_keep_their_source() {
        let err = ServiceError::from(QueryError::InvalidQuery("page_size".into()));
        assert!(err.to_string().starts_with("search failed: "));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn metrics_see_successes_and_failures() {
        let recorder = Arc::new(Recorder::default());
        set_search_metrics(Some(recorder.clone()));

        let service = CatalogService::new(fixtures::canonical_catalog());
        service.search(&Query::text("rental")).unwrap();
        let bad = Query {
            page_size: 0,
            ..Query::default()
        };
        assert!(service.search(&bad).is_err());
        set_search_metrics(None);

        let calls = recorder.calls.lock().unwrap();
        assert!(calls.contains(&Ok(1)));
        assert!(calls.iter().any(|c| matches!(c, Err(QueryError::InvalidQuery(_)))));
    }
}
