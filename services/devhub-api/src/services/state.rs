use std::sync::Arc;
use std::time::Duration;

use crate::clients::{build_http_client, ContestClient, HackathonClient, NewsClient};
use crate::config::Config;
use crate::repo::NotesRepository;
use crate::services::RefreshCoordinator;

/// The three cached feeds; the only mutable state shared between feed requests
pub struct Feeds {
    pub hackathons: RefreshCoordinator<HackathonClient>,
    pub news: RefreshCoordinator<NewsClient>,
    pub contests: RefreshCoordinator<ContestClient>,
}

impl Feeds {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = build_http_client(config.upstream_timeout)?;

        Ok(Self {
            hackathons: RefreshCoordinator::new(
                HackathonClient::new(http.clone(), &config.hackathons_url),
                Duration::from_secs(config.hackathons_cache_ttl),
            ),
            news: RefreshCoordinator::new(
                NewsClient::new(http.clone(), &config.news_url),
                Duration::from_secs(config.news_cache_ttl),
            ),
            contests: RefreshCoordinator::new(
                ContestClient::new(http, &config.contests_url),
                Duration::from_secs(config.contests_cache_ttl),
            ),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub feeds: Arc<Feeds>,
    pub notes: Arc<dyn NotesRepository>,
}

impl AppState {
    pub fn new(config: Config, feeds: Feeds, notes: Arc<dyn NotesRepository>) -> Self {
        Self {
            config,
            feeds: Arc::new(feeds),
            notes,
        }
    }
}
