//! # noteboard-core
//!
//! Core types, traits, and validation rules for the noteboard service.
//!
//! This crate provides the note domain model, the record-store trait the
//! persistence layer implements, the shared error taxonomy, and the
//! normalization rules applied before every store write.

pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    normalize_category, normalize_content, normalize_param, validate_category, validate_title,
    Note, NoteStats, Priority, DEFAULT_CATEGORY, MAX_CATEGORY_LEN, MAX_TITLE_LEN,
    RECENT_NOTES_LIMIT,
};
pub use traits::{CreateNoteRequest, NewNote, NoteFilter, NoteRepository, UpdateNoteRequest};
