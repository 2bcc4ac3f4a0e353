//! Pure, side-effect-free conversions between the stored entity and the
//! wire shapes.
//!
//! Defaulting and trimming rules do NOT live here; the service applies
//! those through the core normalization functions before any write.

use noteboard_core::{Note, UpdateNoteRequest};

use crate::dto::NoteDto;

/// Entity to output representation: every field copied verbatim.
pub fn to_dto(note: Note) -> NoteDto {
    NoteDto {
        id: note.id,
        title: note.title,
        content: note.content,
        category: note.category,
        priority: note.priority,
        published: note.published,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

/// Map a batch of entities, preserving order.
pub fn to_dtos(notes: Vec<Note>) -> Vec<NoteDto> {
    notes.into_iter().map(to_dto).collect()
}

/// Overwrite each entity field present in the update request; absent
/// fields are left untouched.
///
/// The request must already be normalized (a blank title arrives here as
/// `None`, not as an empty string).
pub fn apply_update(req: &UpdateNoteRequest, note: &mut Note) {
    if let Some(title) = &req.title {
        note.title = title.clone();
    }
    if let Some(content) = &req.content {
        note.content = Some(content.clone());
    }
    if let Some(category) = &req.category {
        note.category = category.clone();
    }
    if let Some(priority) = req.priority {
        note.priority = priority;
    }
    if let Some(published) = req.published {
        note.published = published;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noteboard_core::Priority;

    fn sample_note() -> Note {
        Note {
            id: 7,
            title: "Groceries".to_string(),
            content: Some("milk".to_string()),
            category: "Errands".to_string(),
            priority: Priority::Low,
            published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_to_dto_copies_every_field() {
        let note = sample_note();
        let dto = to_dto(note.clone());

        assert_eq!(dto.id, note.id);
        assert_eq!(dto.title, note.title);
        assert_eq!(dto.content, note.content);
        assert_eq!(dto.category, note.category);
        assert_eq!(dto.priority, note.priority);
        assert_eq!(dto.published, note.published);
        assert_eq!(dto.created_at, note.created_at);
        assert_eq!(dto.updated_at, note.updated_at);
    }

    #[test]
    fn test_apply_update_overwrites_only_present_fields() {
        let mut note = sample_note();
        let req = UpdateNoteRequest {
            content: Some("milk, eggs".to_string()),
            ..Default::default()
        };

        apply_update(&req, &mut note);

        assert_eq!(note.content.as_deref(), Some("milk, eggs"));
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.category, "Errands");
        assert_eq!(note.priority, Priority::Low);
        assert!(!note.published);
    }

    #[test]
    fn test_apply_update_explicit_false_is_applied() {
        let mut note = sample_note();
        note.published = true;

        let req = UpdateNoteRequest {
            published: Some(false),
            ..Default::default()
        };
        apply_update(&req, &mut note);
        assert!(!note.published);

        // Absent flag leaves the stored value alone.
        note.published = true;
        apply_update(&UpdateNoteRequest::default(), &mut note);
        assert!(note.published);
    }
}
