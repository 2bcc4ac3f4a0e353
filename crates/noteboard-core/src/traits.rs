//! Core traits for noteboard abstractions.
//!
//! These traits define the record-store interface that concrete
//! implementations must satisfy, enabling pluggable backends and
//! testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Note, Priority};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request for creating a new note, as supplied by a client.
///
/// Only `title` is mandatory; every other field falls back to the
/// documented default when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub published: Option<bool>,
}

/// Request for partially updating a note.
///
/// Absent fields leave the stored value untouched. `published` is
/// `Option<bool>` so an explicit `false` stays distinguishable from
/// "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub published: Option<bool>,
}

impl UpdateNoteRequest {
    /// True when no field is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.published.is_none()
    }
}

/// A fully normalized note ready for insertion.
///
/// Produced by the service after validation and defaulting; the store
/// assigns `id` and both timestamps.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub published: bool,
}

/// Optional predicates combined by AND; an absent predicate matches
/// every note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title OR content.
    pub keyword: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact priority match.
    pub priority: Option<Priority>,
}

// =============================================================================
// NOTE REPOSITORY TRAIT
// =============================================================================

/// Record store for note CRUD and query operations.
///
/// Every listing is ordered by `updated_at` descending unless stated
/// otherwise. Implementations own schema and indexing concerns.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, assigning its id and timestamps.
    async fn insert(&self, note: NewNote) -> Result<Note>;

    /// Persist the mutable fields of an existing note and refresh its
    /// `updated_at` timestamp. Returns the stored row.
    async fn update(&self, note: &Note) -> Result<Note>;

    /// Delete a note by id. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Fetch a note by id.
    async fn fetch(&self, id: i64) -> Result<Option<Note>>;

    /// Check whether a note exists.
    async fn exists(&self, id: i64) -> Result<bool>;

    /// List every note.
    async fn list_all(&self) -> Result<Vec<Note>>;

    /// Case-insensitive substring search over title and content.
    async fn search(&self, keyword: &str) -> Result<Vec<Note>>;

    /// List notes matching the conjunction of the supplied predicates.
    async fn list_filtered(&self, filter: &NoteFilter) -> Result<Vec<Note>>;

    /// List notes with an exact category match.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Note>>;

    /// List notes with an exact priority match.
    async fn list_by_priority(&self, priority: Priority) -> Result<Vec<Note>>;

    /// List notes created inside the given time range.
    async fn created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Note>>;

    /// Distinct category values currently in use, ascending.
    async fn distinct_categories(&self) -> Result<Vec<String>>;

    /// The `limit` most recently updated notes.
    async fn recent(&self, limit: i64) -> Result<Vec<Note>>;

    /// Total note count.
    async fn count(&self) -> Result<i64>;

    /// Note count for one priority.
    async fn count_by_priority(&self, priority: Priority) -> Result<i64>;
}
