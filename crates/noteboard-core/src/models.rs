//! Core data models for noteboard.
//!
//! These types are shared across all noteboard crates and represent
//! the note domain entity, its priority levels, and the normalization
//! rules applied before every store write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Category assigned whenever a note is created or updated with a blank one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Maximum accepted title length in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum accepted category length in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Number of notes returned by the "recent" listing.
pub const RECENT_NOTES_LIMIT: i64 = 10;

// =============================================================================
// PRIORITY
// =============================================================================

/// Priority level of a note.
///
/// Stored as an uppercase string column and serialized the same way on
/// the wire. `display_name()` carries the human-facing Spanish labels
/// from the legacy UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priority levels, in ascending order of urgency.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire/storage name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Human-facing display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Baja",
            Priority::Medium => "Media",
            Priority::High => "Alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(Error::InvalidInput(format!(
                "priority must be one of LOW, MEDIUM, HIGH (got '{}')",
                other
            ))),
        }
    }
}

// =============================================================================
// NOTE ENTITY
// =============================================================================

/// A stored note.
///
/// The record store owns this state; `id` and both timestamps are
/// assigned on insert, and `updated_at` is refreshed on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate note counts, total plus one bucket per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub total: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

// =============================================================================
// NORMALIZATION RULES
// =============================================================================
//
// Plain functions the service calls before every store write; no I/O,
// so the rules test without a database.

/// Trim a title and validate it against the create rules.
///
/// A blank title is rejected; the trimmed value must fit in
/// [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("title: must not be blank".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(Error::InvalidInput(format!(
            "title: must not exceed {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Resolve a category value: trimmed, blank or absent becomes
/// [`DEFAULT_CATEGORY`].
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Validate a category length after normalization.
pub fn validate_category(category: &str) -> Result<()> {
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(Error::InvalidInput(format!(
            "category: must not exceed {} characters",
            MAX_CATEGORY_LEN
        )));
    }
    Ok(())
}

/// Trim optional free text, preserving presence.
pub fn normalize_content(content: Option<&str>) -> Option<String> {
    content.map(|c| c.trim().to_string())
}

/// Normalize an optional text parameter: trimmed, blank becomes absent.
///
/// Used for search keywords and filter criteria, where a blank value
/// means "no predicate".
pub fn normalize_param(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_as_str_roundtrip() {
        for p in Priority::ALL {
            assert_eq!(Priority::from_str(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn test_priority_from_str_case_insensitive() {
        assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
        assert_eq!(Priority::from_str(" Medium ").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str("LOW").unwrap(), Priority::Low);
    }

    #[test]
    fn test_priority_from_str_rejects_unknown() {
        let err = Priority::from_str("URGENT").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("URGENT"));
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_serde_uppercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let parsed: Priority = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_priority_display_names() {
        assert_eq!(Priority::Low.display_name(), "Baja");
        assert_eq!(Priority::Medium.display_name(), "Media");
        assert_eq!(Priority::High.display_name(), "Alta");
    }

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Groceries  ").unwrap(), "Groceries");
    }

    #[test]
    fn test_validate_title_rejects_blank() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_rejects_overlong() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        let err = validate_title(&long).unwrap_err();
        assert!(err.to_string().contains("255"));

        let exact = "x".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&exact).is_ok());
    }

    #[test]
    fn test_normalize_category_defaults_when_blank() {
        assert_eq!(normalize_category(None), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(Some("")), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(Some("   ")), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_normalize_category_trims() {
        assert_eq!(normalize_category(Some("  Work  ")), "Work");
    }

    #[test]
    fn test_validate_category_length() {
        assert!(validate_category("Work").is_ok());
        let long = "c".repeat(MAX_CATEGORY_LEN + 1);
        assert!(validate_category(&long).is_err());
    }

    #[test]
    fn test_normalize_content_preserves_presence() {
        assert_eq!(normalize_content(None), None);
        assert_eq!(normalize_content(Some("  hi  ")), Some("hi".to_string()));
        // Trimming may leave an empty string; presence is what matters.
        assert_eq!(normalize_content(Some("   ")), Some(String::new()));
    }

    #[test]
    fn test_normalize_param_blank_is_absent() {
        assert_eq!(normalize_param(None), None);
        assert_eq!(normalize_param(Some("  ")), None);
        assert_eq!(normalize_param(Some(" rust ")), Some("rust".to_string()));
    }

    #[test]
    fn test_note_serde_roundtrip() {
        let note = Note {
            id: 1,
            title: "Groceries".to_string(),
            content: Some("milk, eggs".to_string()),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::Medium,
            published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
