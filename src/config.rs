use crate::ScrapeError;
use crate::filter::DEFAULT_EXCLUDED_EXTENSIONS;
use crate::utils::ensure_scheme;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable that overrides the configured WebDriver endpoint
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

/// Configuration for a single-site scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL to start crawling from (`https://` is assumed when no scheme is given)
    pub start_url: String,

    /// Directory receiving one text file per page
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum number of pages to visit
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Seconds to wait for the page body and then again for dynamic content to settle
    #[serde(default = "default_wait_time_secs")]
    pub wait_time_secs: u64,

    /// Seconds the browser may spend loading a page before navigation fails
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Path suffixes (without the dot) that are never crawled
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,
}

/// Default value for output_dir
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("scraped_pages")
}

/// Default value for max_pages
pub fn default_max_pages() -> usize {
    50
}

/// Default value for wait_time_secs
pub fn default_wait_time_secs() -> u64 {
    5
}

/// Default value for page_load_timeout_secs
pub fn default_page_load_timeout_secs() -> u64 {
    60
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl ScraperConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            output_dir: default_output_dir(),
            max_pages: default_max_pages(),
            wait_time_secs: default_wait_time_secs(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            excluded_extensions: default_excluded_extensions(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| ScrapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| ScrapeError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScrapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the WebDriver endpoint with `WEBDRIVER_URL` when it is set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(webdriver_url) = std::env::var(WEBDRIVER_URL_ENV) {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }

    /// Absolute seed URL, with `https://` prepended if the scheme is missing
    pub fn seed_url(&self) -> Result<Url, ScrapeError> {
        let normalized = ensure_scheme(&self.start_url);
        let url = Url::parse(&normalized).map_err(|e| ScrapeError::InvalidSeed {
            url: normalized.clone(),
            reason: e.to_string(),
        })?;
        if url.host_str().is_none() {
            return Err(ScrapeError::InvalidSeed {
                url: normalized,
                reason: "URL has no host".to_string(),
            });
        }
        Ok(url)
    }

    /// Readiness timeout and settle delay
    pub fn wait_time(&self) -> Duration {
        Duration::from_secs(self.wait_time_secs)
    }

    /// Upper bound on a single navigation
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// Check the values that cannot be repaired later
    pub fn validate(&self) -> Result<(), ScrapeError> {
        self.seed_url()?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(ScrapeError::Config("output_dir must not be empty".to_string()));
        }
        if self.page_load_timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "page_load_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.webdriver_url.trim().is_empty() {
            return Err(ScrapeError::Config("webdriver_url must not be empty".to_string()));
        }
        Ok(())
    }
}
