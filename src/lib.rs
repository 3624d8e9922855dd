//! Page scribe: a single-site crawler that saves the visible text of every page
//!
//! Starting from a seed URL the crawler renders pages breadth-first through a
//! [`PageFetcher`], writes each page's text to its own file and follows
//! same-domain links until the page budget is spent or no links remain.

pub mod config;
pub mod crawlers;
pub mod filter;
pub mod naming;
pub mod parsers;
pub mod results;
pub mod scrape;
pub mod utils;
pub mod writer;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use crawlers::{CrawlSession, FetchError, PageFetcher, WebDriverFetcher};
pub use filter::AdmissionFilter;
pub use results::{CrawlSummary, PageRecord};
pub use scrape::Scraper;
pub use writer::ContentWriter;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scrape runs
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Could not start a WebDriver session at {url}: {message}")]
    WebDriver { url: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
