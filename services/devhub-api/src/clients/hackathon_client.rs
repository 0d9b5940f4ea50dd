use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{fetch_body, UpstreamAdapter};
use crate::domain::{Hackathon, HackathonListing};
use crate::errors::FetchError;

/// Headers of a browser session on the listing page; the API is picky without them.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("accept", "*/*"),
    ("accept-language", "en-GB,en-US;q=0.9,en;q=0.8"),
    ("priority", "u=1, i"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"130\", \"Google Chrome\";v=\"130\", \"Not?A_Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Linux\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    (
        "referer",
        "https://devpost.com/hackathons?challenge_type[]=online&status[]=upcoming&status[]=open",
    ),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

pub struct HackathonClient {
    client: Client,
    url: String,
}

impl HackathonClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl UpstreamAdapter for HackathonClient {
    type Payload = Vec<Hackathon>;

    fn name(&self) -> &'static str {
        "hackathons"
    }

    /// Fetch open and upcoming online hackathons
    async fn fetch(&self) -> Result<Vec<Hackathon>, FetchError> {
        info!("Fetching hackathons from: {}", self.url);

        let request = BROWSER_HEADERS
            .iter()
            .fold(self.client.get(&self.url), |request, (name, value)| {
                request.header(*name, *value)
            });

        let body = fetch_body(request).await?;
        let listing: HackathonListing = serde_json::from_slice(&body)?;

        Ok(listing.hackathons.into_iter().map(Hackathon::from).collect())
    }
}
