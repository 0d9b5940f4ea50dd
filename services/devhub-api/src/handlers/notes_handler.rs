use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::domain::{NewNote, Note, NoteChanges, NoteOrder, NotePage};
use crate::errors::ApiError;
use crate::handlers::identity::UserEmail;
use crate::services::{AppState, NotesService};

#[derive(Debug, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub notes: Vec<NoteOrder>,
}

/// List the caller's notes with pagination
pub async fn list_notes(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Query(params): Query<PaginationParams>,
) -> Result<Json<NotePage>, ApiError> {
    params.validate()?;

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    let page = NotesService::list_page(state.notes.as_ref(), &user_email, page, limit).await?;
    Ok(Json(page))
}

pub async fn create_note(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Json(note): Json<NewNote>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = NotesService::create(
        state.notes.as_ref(),
        &user_email,
        note,
        state.config.notes_daily_quota,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Move notes to new positions
pub async fn reorder_notes(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, ApiError> {
    let updated = NotesService::reorder(state.notes.as_ref(), &user_email, &request.notes).await?;

    Ok(Json(json!({
        "ok": true,
        "updated": updated
    })))
}

pub async fn get_note(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = NotesService::get(state.notes.as_ref(), &user_email, id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Path(id): Path<i64>,
    Json(changes): Json<NoteChanges>,
) -> Result<Json<Note>, ApiError> {
    let note = NotesService::update(state.notes.as_ref(), &user_email, id, changes).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    UserEmail(user_email): UserEmail,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    NotesService::delete(state.notes.as_ref(), &user_email, id).await?;
    Ok(Json(json!({ "ok": true })))
}
