use anyhow::Context;
use std::env;
use std::time::Duration;

pub const DEFAULT_HACKATHONS_URL: &str =
    "https://devpost.com/api/hackathons?challenge_type[]=online&status[]=upcoming&status[]=open";
pub const DEFAULT_NEWS_URL: &str = "https://www.developer-tech.com/";
pub const DEFAULT_CONTESTS_URL: &str = "https://competeapi.vercel.app/contests/upcoming";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,

    pub hackathons_url: String,
    pub news_url: String,
    pub contests_url: String,
    pub upstream_timeout: Duration,

    // Cache TTLs in seconds
    pub hackathons_cache_ttl: u64,
    pub news_cache_ttl: u64,
    pub contests_cache_ttl: u64,

    pub notes_daily_quota: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: Self::env_parse("DB_MAX_CONNECTIONS", 10),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: Self::env_parse("SERVER_PORT", 3000),

            hackathons_url: env::var("HACKATHONS_URL")
                .unwrap_or_else(|_| DEFAULT_HACKATHONS_URL.to_string()),
            news_url: env::var("NEWS_URL").unwrap_or_else(|_| DEFAULT_NEWS_URL.to_string()),
            contests_url: env::var("CONTESTS_URL")
                .unwrap_or_else(|_| DEFAULT_CONTESTS_URL.to_string()),
            upstream_timeout: Duration::from_secs(Self::env_parse("UPSTREAM_TIMEOUT_SECS", 30)),

            hackathons_cache_ttl: Self::env_parse("HACKATHONS_CACHE_TTL", 3600), // 1h
            news_cache_ttl: Self::env_parse("NEWS_CACHE_TTL", 600), // 10m
            contests_cache_ttl: Self::env_parse("CONTESTS_CACHE_TTL", 3600), // 1h

            notes_daily_quota: Self::env_parse("NOTES_DAILY_QUOTA", 20),
        })
    }

    /// Built-in defaults with only the database URL supplied
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            db_max_connections: 10,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            hackathons_url: DEFAULT_HACKATHONS_URL.to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            contests_url: DEFAULT_CONTESTS_URL.to_string(),
            upstream_timeout: Duration::from_secs(30),
            hackathons_cache_ttl: 3600,
            news_cache_ttl: 600,
            contests_cache_ttl: 3600,
            notes_daily_quota: 20,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
        env::var(key)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }
}
