use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use super::{fetch_body, UpstreamAdapter};
use crate::errors::FetchError;

/// Upcoming programming contests, passed through untouched
pub struct ContestClient {
    client: Client,
    url: String,
}

impl ContestClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl UpstreamAdapter for ContestClient {
    type Payload = Value;

    fn name(&self) -> &'static str {
        "contests"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        info!("Fetching upcoming contests from: {}", self.url);

        let body = fetch_body(self.client.get(&self.url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
