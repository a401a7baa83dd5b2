//! JSON file persistence for session state.
//!
//! One file holds the search history, the saved searches, and favorites:
//!
//! ```json
//! { "searchHistory": [ ... ], "savedSearches": [ ... ], "favorites": [ ... ] }
//! ```
//!
//! A missing file is a fresh session. A file that no longer parses is logged
//! and treated as a fresh session so a bad write never locks a user out.
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::favorites::{Favorite, Favorites};
use crate::history::{HistoryEntry, SearchHistory};
use crate::saved::{SavedSearch, SavedSearches};

/// In-memory session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub history: SearchHistory,
    pub saved: SavedSearches,
    pub favorites: Favorites,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            history: SearchHistory::new(config.max_history),
            saved: SavedSearches::new(),
            favorites: Favorites::new(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionFile {
    search_history: Vec<HistoryEntry>,
    saved_searches: Vec<SavedSearch>,
    favorites: Vec<Favorite>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>, config: SessionConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SessionState, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "session_file_missing");
                return Ok(SessionState::new(&self.config));
            }
            Err(err) => return Err(err.into()),
        };

        let file: SessionFile = match serde_json::from_slice(&bytes) {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "session_file_corrupt"
                );
                return Ok(SessionState::new(&self.config));
            }
        };

        Ok(SessionState {
            history: SearchHistory::from_entries(file.search_history, self.config.max_history),
            saved: SavedSearches::from_searches(file.saved_searches),
            favorites: Favorites::from_favorites(file.favorites),
        })
    }

    /// Write state atomically: a uniquely named sibling temp file is persisted
    /// over the target, and removed if that fails.
    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        let file = SessionFile {
            search_history: state.history.entries().to_vec(),
            saved_searches: state.saved.list().to_vec(),
            favorites: state.favorites.list().to_vec(),
        };
        let json = serde_json::to_vec_pretty(&file)?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        debug!(
            path = %self.path.display(),
            history = file.search_history.len(),
            saved = file.saved_searches.len(),
            favorites = file.favorites.len(),
            "session_saved"
        );
        Ok(())
    }
}
