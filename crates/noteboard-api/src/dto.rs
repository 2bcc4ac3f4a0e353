//! Wire-facing data shapes.
//!
//! DTOs are request/response-scoped and never persisted; the mapper
//! converts between them and the stored entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use noteboard_core::Priority;

/// A note as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDto {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
