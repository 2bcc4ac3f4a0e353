//! Note service: validation, normalization, and store orchestration.
//!
//! All business rules live here, applied before any store write; the
//! repository below is trusted to persist exactly what it is given.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use noteboard_core::{
    normalize_category, normalize_content, normalize_param, validate_category, validate_title,
    CreateNoteRequest, Error, NewNote, Note, NoteFilter, NoteRepository, NoteStats, Priority,
    Result, UpdateNoteRequest, MAX_TITLE_LEN, RECENT_NOTES_LIMIT,
};

use crate::mapper;

/// Orchestrates note operations against a record store.
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    /// Create a new service over the given record store.
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Every note, most recently updated first.
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        self.repo.list_all().await
    }

    /// Fetch one note. Non-positive ids are treated as nonexistent
    /// without a store call.
    pub async fn get(&self, id: i64) -> Result<Note> {
        if id <= 0 {
            return Err(Error::NoteNotFound(id));
        }
        self.repo
            .fetch(id)
            .await?
            .ok_or(Error::NoteNotFound(id))
    }

    /// Create a note after validating and defaulting its fields.
    pub async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        let new_note = validate_create(req)?;

        let note = self.repo.insert(new_note).await?;
        info!(
            subsystem = "service",
            component = "note_service",
            op = "create",
            note_id = note.id,
            category = %note.category,
            "Note created"
        );
        Ok(note)
    }

    /// Partially update a note: only supplied fields change, and a blank
    /// title is ignored rather than rejected.
    pub async fn update(&self, id: i64, req: UpdateNoteRequest) -> Result<Note> {
        if id <= 0 {
            return Err(Error::NoteNotFound(id));
        }
        // Validate before touching the store.
        let req = normalize_update(req)?;

        let mut note = self
            .repo
            .fetch(id)
            .await?
            .ok_or(Error::NoteNotFound(id))?;
        mapper::apply_update(&req, &mut note);

        let stored = self.repo.update(&note).await?;
        info!(
            subsystem = "service",
            component = "note_service",
            op = "update",
            note_id = stored.id,
            "Note updated"
        );
        Ok(stored)
    }

    /// Delete a note. The existence check runs first so a missing id is
    /// reported without side effects.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if id <= 0 {
            return Err(Error::NoteNotFound(id));
        }
        if !self.repo.exists(id).await? {
            return Err(Error::NoteNotFound(id));
        }
        self.repo.delete(id).await?;
        info!(
            subsystem = "service",
            component = "note_service",
            op = "delete",
            note_id = id,
            "Note deleted"
        );
        Ok(())
    }

    /// Case-insensitive substring search over title and content. A blank
    /// keyword behaves as `list_all`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Note>> {
        match normalize_param(Some(keyword)) {
            Some(keyword) => {
                let notes = self.repo.search(&keyword).await?;
                debug!(
                    subsystem = "service",
                    component = "note_service",
                    op = "search",
                    query = %keyword,
                    result_count = notes.len(),
                    "Search completed"
                );
                Ok(notes)
            }
            None => self.list_all().await,
        }
    }

    /// Conjunction of optional keyword, category, and priority
    /// predicates; blank parameters are wildcards.
    pub async fn filter(
        &self,
        keyword: Option<&str>,
        category: Option<&str>,
        priority: Option<Priority>,
    ) -> Result<Vec<Note>> {
        let filter = NoteFilter {
            keyword: normalize_param(keyword),
            category: normalize_param(category),
            priority,
        };
        self.repo.list_filtered(&filter).await
    }

    /// Notes whose category exactly equals the trimmed input; blank
    /// behaves as `list_all`.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Note>> {
        match normalize_param(Some(category)) {
            Some(category) => self.repo.list_by_category(&category).await,
            None => self.list_all().await,
        }
    }

    /// Notes with the given priority; absent behaves as `list_all`.
    pub async fn by_priority(&self, priority: Option<Priority>) -> Result<Vec<Note>> {
        match priority {
            Some(priority) => self.repo.list_by_priority(priority).await,
            None => self.list_all().await,
        }
    }

    /// Notes created inside the given time range.
    pub async fn created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Note>> {
        self.repo.created_between(start, end).await
    }

    /// Distinct category values currently in use, ascending.
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.repo.distinct_categories().await
    }

    /// The ten most recently updated notes.
    pub async fn recent(&self) -> Result<Vec<Note>> {
        self.repo.recent(RECENT_NOTES_LIMIT).await
    }

    /// Aggregate counts: total plus one bucket per priority.
    pub async fn stats(&self) -> Result<NoteStats> {
        let total = self.repo.count().await?;
        let high = self.repo.count_by_priority(Priority::High).await?;
        let medium = self.repo.count_by_priority(Priority::Medium).await?;
        let low = self.repo.count_by_priority(Priority::Low).await?;

        Ok(NoteStats {
            total,
            high,
            medium,
            low,
        })
    }
}

/// Validate a create request, collecting every failing field, and
/// resolve defaults into a normalized insert payload.
fn validate_create(req: CreateNoteRequest) -> Result<NewNote> {
    let mut failures: Vec<String> = Vec::new();

    let title = match req.title.as_deref().map(validate_title) {
        Some(Ok(title)) => Some(title),
        Some(Err(Error::InvalidInput(msg))) => {
            failures.push(msg);
            None
        }
        Some(Err(other)) => return Err(other),
        None => {
            failures.push("title: must not be blank".to_string());
            None
        }
    };

    let category = normalize_category(req.category.as_deref());
    if let Err(Error::InvalidInput(msg)) = validate_category(&category) {
        failures.push(msg);
    }

    if !failures.is_empty() {
        return Err(Error::InvalidInput(failures.join(", ")));
    }

    Ok(NewNote {
        title: title.expect("title validated above"),
        content: normalize_content(req.content.as_deref()),
        category,
        priority: req.priority.unwrap_or_default(),
        published: req.published.unwrap_or(false),
    })
}

/// Normalize an update request in place: trim supplied text, drop a
/// blank title (the create/update asymmetry), and resolve a supplied
/// blank category to the default.
fn normalize_update(req: UpdateNoteRequest) -> Result<UpdateNoteRequest> {
    let title = match req.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => {
            if t.chars().count() > MAX_TITLE_LEN {
                return Err(Error::InvalidInput(format!(
                    "title: must not exceed {} characters",
                    MAX_TITLE_LEN
                )));
            }
            Some(t.to_string())
        }
        // Blank title on update keeps the existing value.
        _ => None,
    };

    let category = match req.category.as_deref() {
        Some(c) => {
            let resolved = normalize_category(Some(c));
            validate_category(&resolved)?;
            Some(resolved)
        }
        None => None,
    };

    Ok(UpdateNoteRequest {
        title,
        content: normalize_content(req.content.as_deref()),
        category,
        priority: req.priority,
        published: req.published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_create_applies_defaults() {
        let new_note = validate_create(CreateNoteRequest {
            title: Some("  Groceries  ".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(new_note.title, "Groceries");
        assert_eq!(new_note.category, "General");
        assert_eq!(new_note.priority, Priority::Medium);
        assert!(!new_note.published);
        assert_eq!(new_note.content, None);
    }

    #[test]
    fn test_validate_create_blank_category_resolves_to_default() {
        let new_note = validate_create(CreateNoteRequest {
            title: Some("Groceries".to_string()),
            category: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(new_note.category, "General");
    }

    #[test]
    fn test_validate_create_missing_title_rejected() {
        let err = validate_create(CreateNoteRequest::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("title: must not be blank"));
    }

    #[test]
    fn test_validate_create_lists_every_failing_field() {
        let err = validate_create(CreateNoteRequest {
            title: Some("".to_string()),
            category: Some("c".repeat(101)),
            ..Default::default()
        })
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("title: must not be blank"));
        assert!(msg.contains("category: must not exceed 100 characters"));
    }

    #[test]
    fn test_normalize_update_drops_blank_title() {
        let req = normalize_update(UpdateNoteRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(req.title, None);
    }

    #[test]
    fn test_normalize_update_trims_and_defaults() {
        let req = normalize_update(UpdateNoteRequest {
            title: Some("  New title  ".to_string()),
            content: Some("  body  ".to_string()),
            category: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(req.title.as_deref(), Some("New title"));
        assert_eq!(req.content.as_deref(), Some("body"));
        assert_eq!(req.category.as_deref(), Some("General"));
    }

    #[test]
    fn test_normalize_update_rejects_overlong_title() {
        let result = normalize_update(UpdateNoteRequest {
            title: Some("x".repeat(MAX_TITLE_LEN + 1)),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
