use thiserror::Error;

/// Errors raised while managing or persisting session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// A saved search name was empty after trimming.
    #[error("saved search name must not be empty")]
    InvalidName,

    #[error("session io error: {0}")]
    Io(String),

    #[error("session json error: {0}")]
    Json(String),

    #[error("csv export error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Json(err.to_string())
    }
}

impl From<csv::Error> for SessionError {
    fn from(err: csv::Error) -> Self {
        SessionError::Csv(err.to_string())
    }
}
