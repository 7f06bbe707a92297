use std::collections::BTreeSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::{ConfigError, ScraperConfig};

/// Matches `https://<domain>/YYYY/MM/<slug>` post permalinks.
pub struct PostLinkMatcher {
    re: Regex,
}

impl PostLinkMatcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let pattern = format!(
            r"https://{}/\d{{4}}/\d{{2}}/[a-z0-9\-]+/?",
            regex::escape(&config.post_domain)
        );
        Ok(Self {
            re: Regex::new(&pattern)?,
        })
    }

    /// Returns the permalink found inside `href`, without its trailing slash.
    pub fn find(&self, href: &str) -> Option<String> {
        self.re
            .find(href)
            .map(|m| m.as_str().trim_end_matches('/').to_string())
    }

    #[cfg(test)]
    fn is_match(&self, url: &str) -> bool {
        self.re.is_match(url)
    }
}

/// Collects every post permalink linked from a listing page, de-duplicated and sorted.
pub fn find_post_links(doc: &Html, matcher: &PostLinkMatcher) -> Vec<String> {
    let anchor_selector = Selector::parse("a[href]").expect("valid css selector");

    let links: BTreeSet<String> = doc
        .select(&anchor_selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| matcher.find(href))
        .collect();

    links.into_iter().collect()
}
