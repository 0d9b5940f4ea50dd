use chrono::{DateTime, Utc};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewNote, Note, NoteChanges, NoteOrder, NotePage};
use crate::errors::ApiError;
use crate::repo::NotesRepository;

pub struct NotesService;

impl NotesService {
    /// One page of the owner's notes, with totals for the pager
    pub async fn list_page(
        repo: &dyn NotesRepository,
        user_email: &str,
        page: i64,
        limit: i64,
    ) -> Result<NotePage, ApiError> {
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::validation(format!("Page {} is out of range", page)))?;
        let notes = repo.list(user_email, limit, offset).await?;
        let total = repo.count(user_email).await?;

        Ok(NotePage::new(notes, page, limit, total))
    }

    /// Create a note unless the owner already used today's quota
    pub async fn create(
        repo: &dyn NotesRepository,
        user_email: &str,
        note: NewNote,
        daily_quota: i64,
        now: DateTime<Utc>,
    ) -> Result<Note, ApiError> {
        note.validate()?;

        repo.create_within_quota(user_email, &note, start_of_day(now), daily_quota)
            .await?
            .ok_or_else(|| {
                warn!("{} hit the daily note quota ({})", user_email, daily_quota);
                ApiError::quota_exceeded(format!("Daily limit of {} notes reached", daily_quota))
            })
    }

    pub async fn get(
        repo: &dyn NotesRepository,
        user_email: &str,
        id: i64,
    ) -> Result<Note, ApiError> {
        repo.find(user_email, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))
    }

    pub async fn update(
        repo: &dyn NotesRepository,
        user_email: &str,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Note, ApiError> {
        changes.validate()?;

        repo.update(user_email, id, &changes)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))
    }

    pub async fn delete(
        repo: &dyn NotesRepository,
        user_email: &str,
        id: i64,
    ) -> Result<(), ApiError> {
        if repo.delete(user_email, id).await? {
            info!("Deleted note {} for {}", id, user_email);
            Ok(())
        } else {
            Err(ApiError::not_found(format!("Note {} not found", id)))
        }
    }

    pub async fn reorder(
        repo: &dyn NotesRepository,
        user_email: &str,
        orders: &[NoteOrder],
    ) -> Result<u64, ApiError> {
        repo.update_order(user_email, orders).await
    }
}

/// Midnight UTC of the day containing `now`
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::InMemoryNotesRepo;
    use chrono::TimeZone;
    use axum::http::StatusCode;

    fn note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_start_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 23, 59, 59).unwrap();
        assert_eq!(start_of_day(now), Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_quota_blocks_creation_for_the_day() {
        let repo = InMemoryNotesRepo::new();
        let now = Utc::now();

        for i in 0..2 {
            NotesService::create(&repo, "a@example.com", note(&format!("n{}", i)), 2, now)
                .await
                .unwrap();
        }

        let err = NotesService::create(&repo, "a@example.com", note("n2"), 2, now)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);

        // Quota is per identity
        NotesService::create(&repo, "b@example.com", note("other"), 2, now)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_creates_stop_at_quota() {
        let repo = InMemoryNotesRepo::new();
        let now = Utc::now();
        let create = |title: &'static str| {
            NotesService::create(&repo, "a@example.com", note(title), 2, now)
        };

        let results = tokio::join!(create("a"), create("b"), create("c"), create("d"));
        let results = [results.0, results.1, results.2, results.3];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.status == StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(repo.count("a@example.com").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_title_is_rejected() {
        let repo = InMemoryNotesRepo::new();
        let err = NotesService::create(&repo, "a@example.com", note(""), 5, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(repo.count("a@example.com").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_notes_are_scoped_to_owner() {
        let repo = InMemoryNotesRepo::new();
        let created = NotesService::create(&repo, "a@example.com", note("mine"), 5, Utc::now())
            .await
            .unwrap();

        let err = NotesService::get(&repo, "b@example.com", created.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = NotesService::delete(&repo, "b@example.com", created.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let moved = NotesService::reorder(
            &repo,
            "b@example.com",
            &[NoteOrder {
                id: created.id,
                order: 9,
            }],
        )
        .await
        .unwrap();
        assert_eq!(moved, 0);

        assert_eq!(NotesService::get(&repo, "a@example.com", created.id).await.unwrap().order, 0);
    }

    #[tokio::test]
    async fn test_list_page_orders_and_counts() {
        let repo = InMemoryNotesRepo::new();
        for title in ["first", "second", "third"] {
            NotesService::create(&repo, "a@example.com", note(title), 10, Utc::now())
                .await
                .unwrap();
        }
        let all = repo.list("a@example.com", 10, 0).await.unwrap();
        let pinned = all.iter().find(|n| n.title == "third").unwrap().id;
        NotesService::reorder(&repo, "a@example.com", &[NoteOrder { id: pinned, order: -1 }])
            .await
            .unwrap();

        let page = NotesService::list_page(&repo, "a@example.com", 1, 2).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.notes.len(), 2);
        assert_eq!(page.notes[0].title, "third");

        let page = NotesService::list_page(&repo, "a@example.com", 2, 2).await.unwrap();
        assert_eq!(page.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_page_past_offset_range_is_rejected() {
        let repo = InMemoryNotesRepo::new();
        let err = NotesService::list_page(&repo, "a@example.com", i64::MAX, 100)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        // Largest page whose offset still fits is just empty
        let page = NotesService::list_page(&repo, "a@example.com", i64::MAX / 100, 100)
            .await
            .unwrap();
        assert!(page.notes.is_empty());
    }
}
