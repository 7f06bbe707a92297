use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const BASE_AUTHOR_URL: &str = "https://diegojavier.wordpress.com/author/diegojavier/";
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ContemplacionesScraper/1.0)";
pub const PAGINATION_LIMIT: usize = 30;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
pub const POST_DELAY: Duration = Duration::from_millis(800);
pub const PAGE_DELAY: Duration = Duration::from_millis(1000);
pub const OUTPUT_PATH: &str = "salida/contemplaciones_diejojavier_all.csv";
pub const LOG_PATH: &str = "scrap.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL {0} has no host")]
    MissingHost(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Immutable settings for one crawl run.
///
/// Built once at startup and handed by reference to the fetcher, the
/// extractor and the crawler.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Author archive page 1. Always ends with `/` so `page/<n>/` can be joined.
    pub base_url: Url,
    /// Host the post-URL pattern is bound to.
    pub post_domain: String,
    pub user_agent: String,
    pub max_pages: usize,
    pub timeout: Duration,
    pub post_delay: Duration,
    pub page_delay: Duration,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
}

impl ScraperConfig {
    /// Builds a config for another author archive, keeping every other default.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let base_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            source,
        })?;
        let post_domain = base_url
            .host_str()
            .ok_or_else(|| ConfigError::MissingHost(raw.clone()))?
            .to_string();

        Ok(Self {
            base_url,
            post_domain,
            ..Self::default()
        })
    }

    /// URL of listing page `page` (1-based).
    pub fn listing_url(&self, page: usize) -> String {
        if page <= 1 {
            return self.base_url.to_string();
        }
        match self.base_url.join(&format!("page/{}/", page)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}page/{}/", self.base_url, page),
        }
    }

    /// Zeroes both politeness delays.
    pub fn without_delays(mut self) -> Self {
        self.post_delay = Duration::ZERO;
        self.page_delay = Duration::ZERO;
        self
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_AUTHOR_URL).expect("constant base URL"),
            post_domain: "diegojavier.wordpress.com".to_string(),
            user_agent: USER_AGENT.to_string(),
            max_pages: PAGINATION_LIMIT,
            timeout: REQUEST_TIMEOUT,
            post_delay: POST_DELAY,
            page_delay: PAGE_DELAY,
            output_path: PathBuf::from(OUTPUT_PATH),
            log_path: PathBuf::from(LOG_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url.as_str(), BASE_AUTHOR_URL);
        assert_eq!(config.post_domain, "diegojavier.wordpress.com");
        assert_eq!(config.max_pages, 30);
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.post_delay, Duration::from_millis(800));
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert_eq!(
            config.output_path,
            PathBuf::from("salida/contemplaciones_diejojavier_all.csv")
        );
    }

    #[test]
    fn listing_urls() {
        let config = ScraperConfig::default();
        assert_eq!(config.listing_url(1), BASE_AUTHOR_URL);
        assert_eq!(
            config.listing_url(2),
            "https://diegojavier.wordpress.com/author/diegojavier/page/2/"
        );
        assert_eq!(
            config.listing_url(30),
            "https://diegojavier.wordpress.com/author/diegojavier/page/30/"
        );
    }

    #[test]
    fn base_url_override_adds_slash_and_domain() {
        let config = ScraperConfig::with_base_url("https://example.org/author/me").unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.org/author/me/");
        assert_eq!(config.post_domain, "example.org");
        assert_eq!(config.listing_url(3), "https://example.org/author/me/page/3/");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            ScraperConfig::with_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn without_delays_zeroes_both() {
        let config = ScraperConfig::default().without_delays();
        assert!(config.post_delay.is_zero());
        assert!(config.page_delay.is_zero());
    }
}
