use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in the output header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text captured from a single page, written once and never updated
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// URL the text was captured from
    pub url: String,

    /// Local time at which the page was captured
    pub scraped_at: DateTime<Local>,

    /// Non-empty text blocks in document order
    pub text_blocks: Vec<String>,
}

impl PageRecord {
    /// Create a record stamped with the current local time
    pub fn new(url: String, text_blocks: Vec<String>) -> Self {
        Self {
            url,
            scraped_at: Local::now(),
            text_blocks,
        }
    }

    /// Render the record in the on-disk text format
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Source URL: {}\n", self.url));
        out.push_str(&format!(
            "Scraped on: {}\n",
            self.scraped_at.format(TIMESTAMP_FORMAT)
        ));
        out.push_str(&"-".repeat(80));
        out.push_str("\n\n");
        out.push_str(&self.text_blocks.join("\n\n"));
        out
    }
}

/// Outcome of a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Pages fetched or attempted (size of the visited set)
    pub pages_visited: usize,

    /// URLs still waiting in the frontier when the run ended
    pub pages_queued: usize,

    /// Pages that produced an output file
    pub pages_written: usize,

    /// Pages fetched successfully but carrying no text
    pub pages_empty: usize,

    /// Pages that could not be fetched
    pub fetch_failures: usize,

    /// Pages whose text could not be written
    pub write_failures: usize,

    /// Whether the run stopped because of a cancellation request
    pub interrupted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_layout() {
        let record = PageRecord {
            url: "https://example.com/about".to_string(),
            scraped_at: Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
            text_blocks: vec!["About us".to_string(), "We make things.".to_string()],
        };

        let expected = format!(
            "Source URL: https://example.com/about\nScraped on: 2024-03-09 07:05:01\n{}\n\nAbout us\n\nWe make things.",
            "-".repeat(80)
        );
        assert_eq!(record.render(), expected);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = CrawlSummary {
            pages_visited: 3,
            pages_queued: 2,
            pages_written: 2,
            fetch_failures: 1,
            ..CrawlSummary::default()
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"pages_visited\":3"));
        assert!(json.contains("\"interrupted\":false"));
    }
}
