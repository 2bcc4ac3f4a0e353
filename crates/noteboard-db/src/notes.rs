//! Note repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use noteboard_core::{Error, NewNote, Note, NoteFilter, NoteRepository, Priority, Result};

use crate::escape_like;

/// Columns selected for every note row, in `Note` field order.
const NOTE_COLUMNS: &str = "id, title, content, category, priority, published, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Wrap a keyword in ILIKE wildcards, escaping any wildcards it contains.
fn like_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, note: NewNote) -> Result<Note> {
        // One timestamp for both columns, so created_at == updated_at on
        // a fresh row.
        let now = Utc::now();
        let query = format!(
            "INSERT INTO notes (title, content, category, priority, published, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {NOTE_COLUMNS}"
        );

        let stored = sqlx::query_as::<_, Note>(&query)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.category)
            .bind(note.priority)
            .bind(note.published)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(stored)
    }

    async fn update(&self, note: &Note) -> Result<Note> {
        let query = format!(
            "UPDATE notes
             SET title = $1, content = $2, category = $3, priority = $4, published = $5, updated_at = $6
             WHERE id = $7
             RETURNING {NOTE_COLUMNS}"
        );

        let stored = sqlx::query_as::<_, Note>(&query)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.category)
            .bind(note.priority)
            .bind(note.published)
            .bind(Utc::now())
            .bind(note.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        stored.ok_or(Error::NoteNotFound(note.id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1");

        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1) AS present")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.get("present"))
    }

    async fn list_all(&self) -> Result<Vec<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY updated_at DESC");

        sqlx::query_as::<_, Note>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE title ILIKE $1 OR content ILIKE $1
             ORDER BY updated_at DESC"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(like_pattern(keyword))
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list_filtered(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        // Absent predicates collapse to TRUE, so the conjunction degrades
        // gracefully to list_all when nothing is supplied.
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE ($1::text IS NULL OR title ILIKE $1 OR content ILIKE $1)
               AND ($2::text IS NULL OR category = $2)
               AND ($3::text IS NULL OR priority = $3)
             ORDER BY updated_at DESC"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(filter.keyword.as_deref().map(like_pattern))
            .bind(filter.category.as_deref())
            .bind(filter.priority)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE category = $1 ORDER BY updated_at DESC"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list_by_priority(&self, priority: Priority) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE priority = $1 ORDER BY updated_at DESC"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(priority)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE created_at >= $1 AND created_at <= $2
             ORDER BY updated_at DESC"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT DISTINCT category FROM notes ORDER BY category ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Note>> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY updated_at DESC LIMIT $1"
        );

        sqlx::query_as::<_, Note>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn count_by_priority(&self, priority: Priority) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE priority = $1")
            .bind(priority)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_keyword() {
        assert_eq!(like_pattern("rust"), "%rust%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\dir"), "%c:\\\\dir%");
    }
}
