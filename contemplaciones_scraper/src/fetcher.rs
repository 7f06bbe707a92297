use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use thiserror::Error;
use tracing::debug;

use crate::config::ScraperConfig;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Source of raw HTML. The crawler only talks to the network through this.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Fetch + ?Sized> Fetch for &T {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_html(url).await
    }
}

/// Plain GET over reqwest with the configured user agent and timeout. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.timeout)
                .build()?,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let res = self.client.get(url).send().await?;

        if !res.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }

        Ok(res.text().await?)
    }
}

/// Fetches `url` and parses it into a queryable document.
pub async fn fetch_document<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> Result<Html, FetchError> {
    let body = fetcher.fetch_html(url).await?;
    Ok(Html::parse_document(&body))
}
