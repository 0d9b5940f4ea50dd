use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_email: String,
    pub title: String,
    pub content: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewNote {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NoteChanges {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoteOrder {
    pub id: i64,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl NotePage {
    pub fn new(notes: Vec<Note>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            notes,
            page,
            limit,
            total,
            total_pages,
        }
    }
}
