pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetcher;
pub mod links;
pub mod liturgy;
pub mod logging;
pub mod output;

use serde::{Deserialize, Serialize};

/// One extracted blog post. Fields that could not be found are empty strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct PostRecord {
    pub title: String,
    pub post_url: String,
    pub blog_date: String,
    pub ciclo: String,
    pub liturgical_day: String,
    pub gospel_reading: String,
    pub other_readings: String,
}

impl PostRecord {
    /// Column order of the CSV output, matching the field order above.
    pub const COLUMNS: [&'static str; 7] = [
        "title",
        "post_url",
        "blog_date",
        "ciclo",
        "liturgical_day",
        "gospel_reading",
        "other_readings",
    ];

    pub fn new(post_url: String, title: String) -> Self {
        Self {
            title,
            post_url,
            ..Self::default()
        }
    }
}
