use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use super::{fetch_body, UpstreamAdapter};
use crate::domain::NewsArticle;
use crate::errors::FetchError;

/// Turns a fetched page into article records.
///
/// Extraction never fails: a page whose layout no longer matches simply yields
/// no articles.
pub trait ArticleExtractor: Send + Sync + 'static {
    fn extract(&self, document: &str) -> Vec<NewsArticle>;
}

static ARTICLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.content.home > div.inner-content > main > article")
        .expect("article selector is valid")
});
static HEADLINE_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("header.article-header h3 a").expect("headline selector is valid")
});
static SUMMARY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.cell.medium-8.large-6 p").expect("summary selector is valid")
});

/// Layout of the developer-tech.com front page
#[derive(Debug, Default, Clone, Copy)]
pub struct DeveloperTechExtractor;

impl ArticleExtractor for DeveloperTechExtractor {
    fn extract(&self, document: &str) -> Vec<NewsArticle> {
        let document = Html::parse_document(document);

        document
            .select(&ARTICLE)
            .map(|article| {
                // Title joins every headline anchor; the link comes from the first
                let title: String = article.select(&HEADLINE_LINK).flat_map(|a| a.text()).collect();
                NewsArticle {
                    title: title.trim().to_string(),
                    desc: article.select(&SUMMARY).next().map(trimmed_text).unwrap_or_default(),
                    link: article
                        .select(&HEADLINE_LINK)
                        .next()
                        .and_then(|a| a.value().attr("href"))
                        .map(str::to_string),
                }
            })
            .collect()
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub struct NewsClient<E = DeveloperTechExtractor> {
    client: Client,
    url: String,
    extractor: E,
}

impl NewsClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self::with_extractor(client, url, DeveloperTechExtractor)
    }
}

impl<E: ArticleExtractor> NewsClient<E> {
    pub fn with_extractor(client: Client, url: impl Into<String>, extractor: E) -> Self {
        Self {
            client,
            url: url.into(),
            extractor,
        }
    }
}

#[async_trait]
impl<E: ArticleExtractor> UpstreamAdapter for NewsClient<E> {
    type Payload = Vec<NewsArticle>;

    fn name(&self) -> &'static str {
        "news"
    }

    /// Scrape the front page for articles
    async fn fetch(&self) -> Result<Vec<NewsArticle>, FetchError> {
        info!("Scraping news from: {}", self.url);

        let body = fetch_body(self.client.get(&self.url)).await?;
        let articles = self.extractor.extract(&String::from_utf8_lossy(&body));

        if articles.is_empty() {
            warn!("No articles matched on {}; page layout may have changed", self.url);
        } else {
            info!("Scraped {} news articles", articles.len());
        }

        Ok(articles)
    }
}
