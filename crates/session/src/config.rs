use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits for per-user session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// History entries kept, newest first.
    ///
    /// Default: `20`
    pub max_history: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("max_history must be greater than zero")]
    ZeroHistory,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_history: 20 }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }
}
