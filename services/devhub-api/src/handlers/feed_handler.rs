use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{Feed, Hackathon, NewsArticle};
use crate::errors::FeedError;
use crate::services::AppState;

/// Open and upcoming online hackathons
pub async fn hackathons(
    State(state): State<AppState>,
) -> Result<Json<Arc<Vec<Hackathon>>>, FeedError> {
    let data = state
        .feeds
        .hackathons
        .get()
        .await
        .map_err(|e| FeedError::new(Feed::Hackathons, e))?;
    Ok(Json(data))
}

/// Latest tech news headlines
pub async fn news(State(state): State<AppState>) -> Result<Json<Arc<Vec<NewsArticle>>>, FeedError> {
    let data = state
        .feeds
        .news
        .get()
        .await
        .map_err(|e| FeedError::new(Feed::News, e))?;
    Ok(Json(data))
}

/// Upcoming programming contests
pub async fn contests(State(state): State<AppState>) -> Result<Json<Arc<Value>>, FeedError> {
    let data = state
        .feeds
        .contests
        .get()
        .await
        .map_err(|e| FeedError::new(Feed::Contests, e))?;
    Ok(Json(data))
}
