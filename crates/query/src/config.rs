use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::QueryError;
use crate::types::{Query, DEFAULT_PAGE_SIZE};

/// Front-end limits applied around the engine.
///
/// The engine itself accepts any positive page size; services use this to
/// supply a default and cap what callers may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when a request does not name one.
    pub default_page_size: u32,
    /// Largest page size a request may ask for.
    pub max_page_size: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("default_page_size must be greater than zero")]
    ZeroPageSize,

    #[error("default_page_size {default} exceeds max_page_size {max}")]
    DefaultAboveMax { default: u32, max: u32 },
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE as u32,
            max_page_size: 100,
        }
    }
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::DefaultAboveMax {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }

    pub fn default_page_size(&self) -> i64 {
        i64::from(self.default_page_size)
    }

    /// Reject queries asking for more than `max_page_size` items per page.
    pub fn check(&self, query: &Query) -> Result<(), QueryError> {
        if query.page_size > i64::from(self.max_page_size) {
            return Err(QueryError::invalid(format!(
                "page_size {} exceeds the limit of {}",
                query.page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}
