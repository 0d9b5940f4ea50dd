use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single upstream fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body was not the JSON shape we expect
    #[error("failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The detached refresh task panicked
    #[error("refresh task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
