use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use super::NotesRepository;
use crate::domain::{NewNote, Note, NoteChanges, NoteOrder};
use crate::errors::ApiError;

/// Process-local notes store for handler tests
#[derive(Default)]
pub struct InMemoryNotesRepo {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNotesRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotesRepository for InMemoryNotesRepo {
    async fn list(&self, user_email: &str, limit: i64, offset: i64) -> Result<Vec<Note>, ApiError> {
        let mut owned: Vec<Note> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_email == user_email)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));

        Ok(owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, user_email: &str) -> Result<i64, ApiError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.iter().filter(|n| n.user_email == user_email).count() as i64)
    }

    async fn create_within_quota(
        &self,
        user_email: &str,
        note: &NewNote,
        since: DateTime<Utc>,
        quota: i64,
    ) -> Result<Option<Note>, ApiError> {
        let mut notes = self.notes.lock().unwrap();
        let used = notes
            .iter()
            .filter(|n| n.user_email == user_email && n.created_at >= since)
            .count() as i64;
        if used >= quota {
            return Ok(None);
        }

        let now = Utc::now();
        let created = Note {
            id: notes.iter().map(|n| n.id).max().unwrap_or(0) + 1,
            user_email: user_email.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            order: 0,
            created_at: now,
            updated_at: now,
        };
        notes.push(created.clone());
        Ok(Some(created))
    }

    async fn find(&self, user_email: &str, id: i64) -> Result<Option<Note>, ApiError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .find(|n| n.id == id && n.user_email == user_email)
            .cloned())
    }

    async fn update(
        &self,
        user_email: &str,
        id: i64,
        changes: &NoteChanges,
    ) -> Result<Option<Note>, ApiError> {
        let mut notes = self.notes.lock().unwrap();
        let Some(note) = notes
            .iter_mut()
            .find(|n| n.id == id && n.user_email == user_email)
        else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            note.title = title.clone();
        }
        if let Some(content) = &changes.content {
            note.content = content.clone();
        }
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete(&self, user_email: &str, id: i64) -> Result<bool, ApiError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.user_email == user_email));
        Ok(notes.len() < before)
    }

    async fn update_order(&self, user_email: &str, orders: &[NoteOrder]) -> Result<u64, ApiError> {
        let mut notes = self.notes.lock().unwrap();
        let mut updated = 0;
        for entry in orders {
            if let Some(note) = notes
                .iter_mut()
                .find(|n| n.id == entry.id && n.user_email == user_email)
            {
                note.order = entry.order;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
