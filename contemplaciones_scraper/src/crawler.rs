use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::{ConfigError, ScraperConfig};
use crate::extract::PostExtractor;
use crate::fetcher::{fetch_document, Fetch, FetchError};
use crate::links::{find_post_links, PostLinkMatcher};
use crate::PostRecord;

/// Why the crawl stopped walking listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every page up to the configured limit was visited.
    PageLimit,
    FetchFailed { page: usize },
    NoLinks { page: usize },
    /// Every link on the page had already been processed.
    NoNewLinks { page: usize },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::PageLimit => write!(f, "page limit reached"),
            StopReason::FetchFailed { page } => write!(f, "listing page {} could not be fetched", page),
            StopReason::NoLinks { page } => write!(f, "listing page {} has no post links", page),
            StopReason::NoNewLinks { page } => write!(f, "listing page {} has no new post links", page),
        }
    }
}

#[derive(Debug)]
pub struct CrawlReport {
    /// Extracted posts in discovery order.
    pub records: Vec<PostRecord>,
    pub pages_fetched: usize,
    pub failed_posts: usize,
    pub stop: StopReason,
}

pub struct Crawler<F: Fetch> {
    fetcher: F,
    config: ScraperConfig,
    matcher: PostLinkMatcher,
    extractor: PostExtractor,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            matcher: PostLinkMatcher::new(&config)?,
            extractor: PostExtractor::new()?,
            fetcher,
            config,
        })
    }

    /// Walks listing pages from 1 up to the page limit, extracting every post not seen yet.
    ///
    /// A listing page that fails to load ends the crawl; a post that fails is skipped.
    pub async fn crawl(&self) -> CrawlReport {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();
        let mut pages_fetched = 0;
        let mut failed_posts = 0;

        let stop = 'pages: {
            for page in 1..=self.config.max_pages {
                let page_url = self.config.listing_url(page);

                let links = match self.listing_links(&page_url).await {
                    Ok(links) => links,
                    Err(e) => {
                        eprintln!("❌ Error opening {}: {}", page_url, e);
                        debug!("Error opening {}: {}", page_url, e);
                        break 'pages StopReason::FetchFailed { page };
                    }
                };
                pages_fetched += 1;

                if links.is_empty() {
                    debug!("No post links on {}", page_url);
                    break 'pages StopReason::NoLinks { page };
                }

                let new_links: Vec<String> =
                    links.into_iter().filter(|link| !seen.contains(link)).collect();
                if new_links.is_empty() {
                    debug!("No new post links on {}", page_url);
                    break 'pages StopReason::NoNewLinks { page };
                }

                println!("🔍 Page {}: {} new posts found.", page, new_links.len());

                for link in new_links {
                    match self.extractor.extract(&self.fetcher, &link).await {
                        Ok(record) => {
                            info!(
                                "Entry processed: {} | URL: {} | Date: {}",
                                record.title, record.post_url, record.blog_date
                            );
                            seen.insert(link);
                            records.push(record);
                            pause(self.config.post_delay).await;
                        }
                        Err(e) => {
                            error!("Error processing {}: {}", link, e);
                            eprintln!("❌ Error processing {}: {}", link, e);
                            failed_posts += 1;
                        }
                    }
                }

                pause(self.config.page_delay).await;
            }
            StopReason::PageLimit
        };

        CrawlReport {
            records,
            pages_fetched,
            failed_posts,
            stop,
        }
    }

    async fn listing_links(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let doc = fetch_document(&self.fetcher, url).await?;
        Ok(find_post_links(&doc, &self.matcher))
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
