use thiserror::Error;

/// Errors raised by the query engine.
///
/// Every other irregular input (unknown category, unknown sort key, filters that
/// match nothing) is a valid but unsatisfiable query and produces an empty or
/// default-sorted result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    /// Malformed pagination parameters or an inverted/invalid range.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl QueryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        QueryError::InvalidQuery(msg.into())
    }

    /// Status code a front-end would report for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            QueryError::InvalidQuery(_) => 400,
        }
    }
}
