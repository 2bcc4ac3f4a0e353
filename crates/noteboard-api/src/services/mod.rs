//! Service-layer components sitting between the HTTP handlers and the
//! record store.

mod note_service;

pub use note_service::NoteService;
