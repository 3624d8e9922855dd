use clap::Parser;
use page_scribe::{CrawlSummary, Scraper};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

mod args;
use args::Args;

/// Conventional exit status for termination by SIGINT
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let json = args.json;

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\nStarting to scrape: {}", config.start_url);
    println!("Saving to folder: {}", config.output_dir.display());
    println!("Maximum pages: {}", config.max_pages);
    println!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");
    println!("{}", "=".repeat(50));

    // First Ctrl-C stops the crawl before the next page, a second one exits at once
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        ::log::info!("Interrupt received, finishing current page");
        eprintln!("\nStopping after the current page (press Ctrl-C again to quit now)");
        interrupt.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::warn!("Second interrupt received, exiting");
            std::process::exit(EXIT_INTERRUPTED);
        }
    });

    match Scraper::with_config(config).run(cancel).await {
        Ok(summary) => {
            report(&summary, json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            eprintln!("\nAn unexpected error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(summary: &CrawlSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{}", text),
            Err(e) => ::log::error!("Failed to serialize summary: {}", e),
        }
        return;
    }

    if summary.interrupted {
        println!("\nScraping interrupted by user");
    } else {
        println!("\nScraping completed!");
    }
    println!("Total pages scraped: {}", summary.pages_visited);
    println!("Files written: {}", summary.pages_written);
    println!("Pages without text: {}", summary.pages_empty);
    println!(
        "Failures: {} fetch, {} write",
        summary.fetch_failures, summary.write_failures
    );
    println!("URLs left in queue: {}", summary.pages_queued);
}
