use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::ApiError;

pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Caller identity taken from the `x-user-email` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEmail(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserEmail
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| UserEmail(v.to_string()))
            .ok_or_else(|| ApiError::validation("User email is required"))
    }
}
