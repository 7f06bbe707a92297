use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::{Fetch, FetchError};
use crate::liturgy::Heuristics;
use crate::PostRecord;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("no heading or <title> found in {url}")]
    MissingTitle { url: String },
}

/// Turns a post page into a [`PostRecord`].
pub struct PostExtractor {
    heuristics: Heuristics,
    title_class: Regex,
    content_class: Regex,
}

impl PostExtractor {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            heuristics: Heuristics::new()?,
            title_class: Regex::new(r"(?i)entry-title|post-title")?,
            content_class: Regex::new(r"(?i)entry-content|post-content")?,
        })
    }

    /// Fetches `url` and extracts its record. Any fetch failure is returned as is.
    pub async fn extract<F: Fetch + ?Sized>(
        &self,
        fetcher: &F,
        url: &str,
    ) -> Result<PostRecord, ExtractError> {
        let body = fetcher.fetch_html(url).await?;
        self.parse(url, &body)
    }

    pub fn parse(&self, url: &str, html: &str) -> Result<PostRecord, ExtractError> {
        let doc = Html::parse_document(html);

        let title = self
            .find_title(&doc)
            .ok_or_else(|| ExtractError::MissingTitle {
                url: url.to_string(),
            })?;
        let mut record = PostRecord::new(url.to_string(), title);

        record.blog_date = find_date(&doc);

        let content = self.content_text(&doc);

        let cycle = self.heuristics.cycle_and_day(&record.title, &content);
        record.ciclo = cycle.ciclo;
        record.liturgical_day = cycle.liturgical_day;

        let readings = self.heuristics.readings(&content);
        record.gospel_reading = readings.gospel;
        record.other_readings = readings.other;

        Ok(record)
    }

    /// Classed `h1`/`h2` first, then the first `h1`, then `<title>`.
    fn find_title(&self, doc: &Html) -> Option<String> {
        let heading_selector = Selector::parse("h1, h2").expect("valid css selector");
        let h1_selector = Selector::parse("h1").expect("valid css selector");
        let title_selector = Selector::parse("title").expect("valid css selector");

        doc.select(&heading_selector)
            .find(|el| el.value().classes().any(|c| self.title_class.is_match(c)))
            .or_else(|| doc.select(&h1_selector).next())
            .or_else(|| doc.select(&title_selector).next())
            .map(collapsed_text)
    }

    /// `<article>`, else a classed content `div`, else the whole document.
    fn content_text(&self, doc: &Html) -> String {
        let article_selector = Selector::parse("article").expect("valid css selector");
        let div_selector = Selector::parse("div[class]").expect("valid css selector");

        let container = doc
            .select(&article_selector)
            .next()
            .or_else(|| {
                doc.select(&div_selector)
                    .find(|el| el.value().classes().any(|c| self.content_class.is_match(c)))
            })
            .unwrap_or_else(|| doc.root_element());

        block_text(container)
    }
}

/// First `<time>`: its `datetime` cut to `YYYY-MM-DD`, else its text, else empty.
fn find_date(doc: &Html) -> String {
    let time_selector = Selector::parse("time").expect("valid css selector");

    match doc.select(&time_selector).next() {
        Some(el) => match el.value().attr("datetime") {
            Some(datetime) if !datetime.is_empty() => datetime.chars().take(10).collect(),
            _ => collapsed_text(el),
        },
        None => String::new(),
    }
}

fn collapsed_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text nodes trimmed, empties dropped, one per line.
fn block_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://diegojavier.wordpress.com/2022/07/domingo-15-ciclo-c";

    fn parse(html: &str) -> PostRecord {
        PostExtractor::new().unwrap().parse(URL, html).unwrap()
    }

    #[test]
    fn wordpress_post() {
        let record = parse(
            r#"<html><head><title>Blog | Contemplaciones</title></head><body>
            <h2 class="widget-title">Archivo</h2>
            <article class="post">
              <header>
                <h1 class="entry-title">Domingo   15
                  (Ciclo C)</h1>
                <time class="entry-date published" datetime="2022-07-10T08:00:00+02:00">10 julio, 2022</time>
              </header>
              <div class="entry-content">
                <p>Primera lectura: <em>Dt 30, 10-14</em></p>
                <p>Evangelio: Lc 10, 25-37</p>
                <p>Salmo y segunda lectura: Col 1, 15-20</p>
              </div>
            </article>
            </body></html>"#,
        );

        assert_eq!(record.title, "Domingo 15 (Ciclo C)");
        assert_eq!(record.post_url, URL);
        assert_eq!(record.blog_date, "2022-07-10");
        assert_eq!(record.ciclo, "C");
        assert_eq!(record.liturgical_day, "Ciclo C");
        assert_eq!(record.gospel_reading, "Lc 10, 25-37");
        assert_eq!(record.other_readings, "");
    }

    #[test]
    fn classed_h2_title_wins_over_plain_h1() {
        let record = parse(
            r#"<body><h1>Contemplaciones</h1><h2 class="post-title">Adviento ciclo B</h2></body>"#,
        );
        assert_eq!(record.title, "Adviento ciclo B");
        assert_eq!(record.liturgical_day, "Adviento ciclo B");
        assert_eq!(record.ciclo, "B");
    }

    #[test]
    fn falls_back_to_h1_then_title() {
        let record = parse(r#"<body><h1> Primer título </h1><h1>Segundo</h1></body>"#);
        assert_eq!(record.title, "Primer título");

        let record =
            parse(r#"<html><head><title> Navidad 2023 </title></head><body><p>x</p></body></html>"#);
        assert_eq!(record.title, "Navidad 2023");
        assert_eq!(record.liturgical_day, "Navidad 2023");
    }

    #[test]
    fn title_nodes_keep_a_space_between_them() {
        let record = parse(r#"<h1>Domingo 15 <span>(Ciclo B)</span></h1>"#);
        assert_eq!(record.title, "Domingo 15 (Ciclo B)");

        let record = parse(r#"<h1>Domingo 15<span> (Ciclo B) </span></h1>"#);
        assert_eq!(record.title, "Domingo 15 (Ciclo B)");
    }

    #[test]
    fn missing_title_is_an_error() {
        let err = PostExtractor::new()
            .unwrap()
            .parse(URL, "<body><p>sin título</p></body>")
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingTitle { .. }));
    }

    #[test]
    fn date_from_text_or_empty() {
        let record = parse(r#"<h1>Uno</h1><time>3 marzo, 2021</time>"#);
        assert_eq!(record.blog_date, "3 marzo, 2021");

        let record = parse(r#"<h1>Uno</h1><time datetime="">4 marzo</time>"#);
        assert_eq!(record.blog_date, "4 marzo");

        let record = parse(r#"<h1>Uno</h1><p>sin fecha</p>"#);
        assert_eq!(record.blog_date, "");
    }

    #[test]
    fn content_div_used_without_article() {
        let record = parse(
            r#"<body><h1>Una contemplación</h1>
            <div class="sidebar">Mt 1, 1</div>
            <div class="post-content"><p>Ciclo A</p><p>Is 7, 10-14</p></div></body>"#,
        );
        assert_eq!(record.ciclo, "A");
        assert_eq!(record.gospel_reading, "Is 7, 10-14");
        assert_eq!(record.other_readings, "");
    }

    #[test]
    fn whole_document_as_last_resort() {
        let record = parse(
            r#"<body><h1>Una contemplación</h1><p>Jn 1, 1-18</p><p>Is 52, 7-10</p></body>"#,
        );
        assert_eq!(record.gospel_reading, "Jn 1, 1-18");
        assert_eq!(record.other_readings, "Is 52, 7-10");
    }

    #[test]
    fn no_citations_leaves_empty_fields() {
        let record = parse(r#"<h1>Una contemplación</h1><article><p>Silencio.</p></article>"#);
        assert_eq!(record.gospel_reading, "");
        assert_eq!(record.other_readings, "");
        assert_eq!(record.ciclo, "");
        assert_eq!(record.liturgical_day, "");
    }
}
