use chrono::{DateTime, Utc};
use query::Query;
use serde::{Deserialize, Serialize};

/// How a search was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Free text only.
    Quick,
    /// At least one structured filter.
    Advanced,
}

impl SearchKind {
    pub fn of(query: &Query) -> Self {
        if query.filters.is_active() {
            SearchKind::Advanced
        } else {
            SearchKind::Quick
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Quick => "quick",
            SearchKind::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub kind: SearchKind,
    pub query: Query,
    pub recorded_at: DateTime<Utc>,
}

/// Recent searches, newest first, capped at `max_entries`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl SearchHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Rebuild from persisted entries, keeping only the newest `max_entries`.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, max_entries: usize) -> Self {
        entries.truncate(max_entries);
        Self {
            entries,
            max_entries,
        }
    }

    /// Record a query. Queries with no text and no filters are ignored.
    pub fn record(&mut self, query: &Query) -> Option<&HistoryEntry> {
        self.record_at(query, Utc::now())
    }

    pub fn record_at(&mut self, query: &Query, at: DateTime<Utc>) -> Option<&HistoryEntry> {
        if query.needle().is_none() && !query.filters.is_active() {
            return None;
        }
        self.entries.insert(
            0,
            HistoryEntry {
                kind: SearchKind::of(query),
                query: query.clone(),
                recorded_at: at,
            },
        );
        self.entries.truncate(self.max_entries);
        self.entries.first()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
