//! In-process document store for generated writings: per-user history plus
//! named collections that hold copies of history entries. This is the seam
//! where a real deployment plugs in its external store; the record shapes
//! match what the outer CRUD layer persists.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::request::GenerationRequest;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub request: GenerationRequest,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub writings: Vec<Writing>,
    pub created_at: DateTime<Utc>,
}

/// A writing filed into a collection. The request fields and response are
/// copied from the history entry at add time, so deleting history later
/// leaves collections intact.
#[derive(Debug, Clone, Serialize)]
pub struct Writing {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: GenerationRequest,
    pub response: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    HistoryNotFound,
    CollectionNotFound,
    WritingNotFound,
    NotOwner,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StoreError::HistoryNotFound => "history entry not found",
            StoreError::CollectionNotFound => "collection not found",
            StoreError::WritingNotFound => "writing not found in collection",
            StoreError::NotOwner => "entry belongs to a different user",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for StoreError {}

#[derive(Default)]
struct Inner {
    history: Vec<HistoryEntry>,
    collections: Vec<Collection>,
}

/// Cloneable handle over the shared store state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one generation into the user's history. Fallback text is
    /// recorded like any other response.
    pub fn record(&self, user_id: Uuid, request: &GenerationRequest, response: &str) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            request: request.clone(),
            response: response.to_string(),
            created_at: Utc::now(),
        };
        self.inner.write().history.push(entry.clone());
        entry
    }

    /// The user's history, most recent first.
    pub fn history(&self, user_id: Uuid) -> Vec<HistoryEntry> {
        let inner = self.inner.read();
        let mut entries: Vec<HistoryEntry> = inner
            .history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    pub fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let pos = inner
            .history
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(StoreError::HistoryNotFound)?;
        if inner.history[pos].user_id != user_id {
            return Err(StoreError::NotOwner);
        }
        inner.history.remove(pos);
        Ok(())
    }

    /// Delete the user's entries over an inclusive range of calendar days:
    /// the start clamps to 00:00:00.000 and the end to 23:59:59.999, so a
    /// single-day range covers that whole day. Returns how many were removed.
    pub fn delete_range(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate) -> usize {
        let from = start.and_hms_opt(0, 0, 0).expect("valid day start").and_utc();
        let to = end
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("valid day end")
            .and_utc();

        let mut inner = self.inner.write();
        let before = inner.history.len();
        inner.history.retain(|e| {
            e.user_id != user_id || e.created_at < from || e.created_at > to
        });
        before - inner.history.len()
    }

    pub fn clear_history(&self, user_id: Uuid) -> usize {
        let mut inner = self.inner.write();
        let before = inner.history.len();
        inner.history.retain(|e| e.user_id != user_id);
        before - inner.history.len()
    }

    pub fn create_collection(&self, user_id: Uuid, name: &str, description: &str) -> Collection {
        let collection = Collection {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            description: description.to_string(),
            writings: Vec::new(),
            created_at: Utc::now(),
        };
        self.inner.write().collections.push(collection.clone());
        collection
    }

    /// The user's collections, most recent first.
    pub fn collections(&self, user_id: Uuid) -> Vec<Collection> {
        let inner = self.inner.read();
        let mut out: Vec<Collection> = inner
            .collections
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Copy a history entry into a collection as a new writing. No ownership
    /// check here; authorization is the outer layer's concern.
    pub fn add_writing(&self, collection_id: Uuid, history_id: Uuid) -> Result<Writing, StoreError> {
        let mut inner = self.inner.write();
        let entry = inner
            .history
            .iter()
            .find(|e| e.id == history_id)
            .ok_or(StoreError::HistoryNotFound)?;
        let writing = Writing {
            id: Uuid::new_v4(),
            request: entry.request.clone(),
            response: entry.response.clone(),
            added_at: Utc::now(),
        };
        let collection = inner
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or(StoreError::CollectionNotFound)?;
        collection.writings.push(writing.clone());
        Ok(writing)
    }

    pub fn writings(&self, collection_id: Uuid) -> Result<Vec<Writing>, StoreError> {
        let inner = self.inner.read();
        inner
            .collections
            .iter()
            .find(|c| c.id == collection_id)
            .map(|c| c.writings.clone())
            .ok_or(StoreError::CollectionNotFound)
    }

    pub fn writing(&self, collection_id: Uuid, writing_id: Uuid) -> Result<Writing, StoreError> {
        let inner = self.inner.read();
        let collection = inner
            .collections
            .iter()
            .find(|c| c.id == collection_id)
            .ok_or(StoreError::CollectionNotFound)?;
        collection
            .writings
            .iter()
            .find(|w| w.id == writing_id)
            .cloned()
            .ok_or(StoreError::WritingNotFound)
    }
}
