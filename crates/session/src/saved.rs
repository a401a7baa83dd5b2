use chrono::{DateTime, Utc};
use query::Query;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: Uuid,
    pub name: String,
    pub query: Query,
    pub saved_at: DateTime<Utc>,
}

/// Named queries in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedSearches {
    searches: Vec<SavedSearch>,
}

impl SavedSearches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_searches(searches: Vec<SavedSearch>) -> Self {
        Self { searches }
    }

    pub fn save(&mut self, name: &str, query: Query) -> Result<&SavedSearch, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidName);
        }
        let idx = self.searches.len();
        self.searches.push(SavedSearch {
            id: Uuid::new_v4(),
            name: name.to_string(),
            query,
            saved_at: Utc::now(),
        });
        Ok(&self.searches[idx])
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedSearch> {
        self.searches.iter().find(|s| s.id == id)
    }

    /// Most recently saved search with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&SavedSearch> {
        let name = name.trim();
        self.searches.iter().rev().find(|s| s.name == name)
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.searches.len();
        self.searches.retain(|s| s.id != id);
        self.searches.len() != before
    }

    pub fn list(&self) -> &[SavedSearch] {
        &self.searches
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }
}
