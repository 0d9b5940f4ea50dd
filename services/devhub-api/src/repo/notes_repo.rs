use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::domain::{NewNote, Note, NoteChanges, NoteOrder};
use crate::errors::ApiError;

/// Storage for notes. Every operation is scoped to the owning identity.
#[async_trait]
pub trait NotesRepository: Send + Sync {
    /// Page of the owner's notes by `order` ascending, newest first within an order
    async fn list(&self, user_email: &str, limit: i64, offset: i64) -> Result<Vec<Note>, ApiError>;

    async fn count(&self, user_email: &str) -> Result<i64, ApiError>;

    /// Insert the note unless the owner already created `quota` notes at or after
    /// `since`. The count and the insert are atomic per owner; `None` means the
    /// quota was used up.
    async fn create_within_quota(
        &self,
        user_email: &str,
        note: &NewNote,
        since: DateTime<Utc>,
        quota: i64,
    ) -> Result<Option<Note>, ApiError>;

    async fn find(&self, user_email: &str, id: i64) -> Result<Option<Note>, ApiError>;

    async fn update(
        &self,
        user_email: &str,
        id: i64,
        changes: &NoteChanges,
    ) -> Result<Option<Note>, ApiError>;

    /// Returns false when no such note belongs to the owner
    async fn delete(&self, user_email: &str, id: i64) -> Result<bool, ApiError>;

    /// Apply new positions; ids the owner does not own are skipped
    async fn update_order(&self, user_email: &str, orders: &[NoteOrder]) -> Result<u64, ApiError>;
}

const NOTE_COLUMNS: &str = "id, user_email, title, content, sort_order, created_at, updated_at";

pub struct PgNotesRepo {
    pool: PgPool,
}

impl PgNotesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize notes table
    pub async fn init_tables(&self) -> Result<(), ApiError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notes (
                id BIGSERIAL PRIMARY KEY,
                user_email TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notes_owner_order
             ON notes(user_email, sort_order, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn note_from_row(row: &PgRow) -> Result<Note, sqlx::Error> {
    Ok(Note {
        id: row.try_get("id")?,
        user_email: row.try_get("user_email")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        order: row.try_get("sort_order")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl NotesRepository for PgNotesRepo {
    async fn list(&self, user_email: &str, limit: i64, offset: i64) -> Result<Vec<Note>, ApiError> {
        let rows = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             WHERE user_email = $1
             ORDER BY sort_order ASC, created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(user_email)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(note_from_row).collect::<Result<_, _>>()?)
    }

    async fn count(&self, user_email: &str) -> Result<i64, ApiError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM notes WHERE user_email = $1")
            .bind(user_email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    async fn create_within_quota(
        &self,
        user_email: &str,
        note: &NewNote,
        since: DateTime<Utc>,
        quota: i64,
    ) -> Result<Option<Note>, ApiError> {
        let mut tx = self.pool.begin().await?;

        // Serializes creations per owner until commit
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(user_email)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM notes WHERE user_email = $1 AND created_at >= $2",
        )
        .bind(user_email)
        .bind(since)
        .fetch_one(&mut *tx)
        .await?;
        let used: i64 = row.try_get("count")?;

        if used >= quota {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query(&format!(
            "INSERT INTO notes (user_email, title, content)
             VALUES ($1, $2, $3)
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(user_email)
        .bind(&note.title)
        .bind(&note.content)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        let note = note_from_row(&row)?;
        info!("Created note {} for {}", note.id, user_email);
        Ok(Some(note))
    }

    async fn find(&self, user_email: &str, id: i64) -> Result<Option<Note>, ApiError> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 AND user_email = $2"
        ))
        .bind(id)
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn update(
        &self,
        user_email: &str,
        id: i64,
        changes: &NoteChanges,
    ) -> Result<Option<Note>, ApiError> {
        let row = sqlx::query(&format!(
            "UPDATE notes
             SET title = COALESCE($3, title),
                 content = COALESCE($4, content),
                 updated_at = now()
             WHERE id = $1 AND user_email = $2
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(user_email)
        .bind(&changes.title)
        .bind(&changes.content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row).transpose()?)
    }

    async fn delete(&self, user_email: &str, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_email = $2")
            .bind(id)
            .bind(user_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_order(&self, user_email: &str, orders: &[NoteOrder]) -> Result<u64, ApiError> {
        let mut tx = self.pool.begin().await?;
        let mut updated = 0;

        for entry in orders {
            let result = sqlx::query(
                "UPDATE notes SET sort_order = $3, updated_at = now()
                 WHERE id = $1 AND user_email = $2",
            )
            .bind(entry.id)
            .bind(user_email)
            .bind(entry.order)
            .execute(&mut *tx)
            .await?;

            updated += result.rows_affected();
        }

        tx.commit().await?;
        info!("Reordered {} notes for {}", updated, user_email);
        Ok(updated)
    }
}
