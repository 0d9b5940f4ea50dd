use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::Feed;
use crate::errors::FetchError;

/// A failed feed read, rendered with the feed's fixed error body
#[derive(Debug)]
pub struct FeedError {
    pub feed: Feed,
    pub source: FetchError,
}

impl FeedError {
    pub fn new(feed: Feed, source: FetchError) -> Self {
        Self { feed, source }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to load {} feed: {}", self.feed.as_str(), self.source);

        let body = match self.feed {
            Feed::Hackathons => json!({ "error": "Failed to fetch hackathons" }),
            Feed::News | Feed::Contests => json!({ "message": "Error scraping website" }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
