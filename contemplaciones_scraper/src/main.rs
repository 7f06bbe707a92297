use anyhow::Context;
use clap::Parser;
use contemplaciones_scraper::{
    config::ScraperConfig, crawler::Crawler, fetcher::HttpFetcher, logging, output,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Crawls the Contemplaciones author archive into a CSV file", long_about = None)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    let config = ScraperConfig::default();

    logging::init(&config.log_path)
        .with_context(|| format!("cannot open log file {}", config.log_path.display()))?;

    println!("Starting crawl of {}", config.base_url);

    let fetcher = HttpFetcher::new(&config).context("cannot build HTTP client")?;
    let output_path = config.output_path.clone();
    let crawler = Crawler::new(fetcher, config)?;

    let report = crawler.crawl().await;

    output::save_csv(&report.records, &output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!(
        "Done: {} pages, {} posts saved, {} failed ({}).",
        report.pages_fetched,
        report.records.len(),
        report.failed_posts,
        report.stop
    );
    Ok(())
}
