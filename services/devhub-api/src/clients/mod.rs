pub mod contest_client;
pub mod hackathon_client;
pub mod news_client;

pub use contest_client::ContestClient;
pub use hackathon_client::HackathonClient;
pub use news_client::{ArticleExtractor, DeveloperTechExtractor, NewsClient};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::warn;

use crate::errors::FetchError;

/// One upstream source: a single fetch producing a normalized payload.
///
/// The refresh coordinator is written against this trait only, so it does not
/// care whether the payload came from a JSON API or a scraped page.
#[async_trait]
pub trait UpstreamAdapter: Send + Sync + 'static {
    type Payload: Send + Sync + 'static;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Self::Payload, FetchError>;
}

pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent("devhub-api/0.1")
        .build()
}

/// Send the request and return the body of a successful response.
///
/// Non-2xx statuses become [`FetchError::Status`]; nothing is retried.
pub(crate) async fn fetch_body(request: RequestBuilder) -> Result<bytes::Bytes, FetchError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        warn!("Upstream {} answered {}", response.url(), status);
        return Err(FetchError::Status(status));
    }

    Ok(response.bytes().await?)
}
