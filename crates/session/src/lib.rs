//! # Catalog Session (`session`)
//!
//! Per-user state that sits around the query engine without touching it:
//!
//! - [`SearchHistory`]: the most recent non-trivial queries, newest first.
//! - [`SavedSearches`]: named queries a user can replay.
//! - [`Favorites`]: starred products, toggled on and off.
//! - [`SessionStore`]: persists all three to a single JSON file.
//! - [`export_csv`]: writes a result page as CSV.
//!
//! ```
//! use query::Query;
//! use session::{SessionConfig, SessionState};
//!
//! let mut state = SessionState::new(&SessionConfig::default());
//! state.history.record(&Query::text("outdoor"));
//! state.saved.save("outdoor", Query::text("outdoor")).unwrap();
//! assert_eq!(state.history.len(), 1);
//! ```
mod config;
mod error;
mod export;
mod favorites;
mod history;
mod saved;
mod store;

pub use crate::config::{ConfigError, SessionConfig};
pub use crate::error::SessionError;
pub use crate::export::{export_csv, CSV_HEADERS};
pub use crate::favorites::{Favorite, Favorites};
pub use crate::history::{HistoryEntry, SearchHistory, SearchKind};
pub use crate::saved::{SavedSearch, SavedSearches};
pub use crate::store::{SessionState, SessionStore};
