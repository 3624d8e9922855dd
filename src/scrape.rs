use crate::ScrapeError;
use crate::config::ScraperConfig;
use crate::crawlers::{self, CrawlSession, PageFetcher, WebDriverFetcher};
use crate::filter::AdmissionFilter;
use crate::results::CrawlSummary;
use crate::writer::ContentWriter;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Builder struct for configuring and running a scrape
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    /// Create a new Scraper with default settings for `start_url`
    pub fn new(start_url: &str) -> Self {
        Self {
            config: ScraperConfig::new(start_url),
        }
    }

    /// Create a Scraper from a complete configuration
    pub fn with_config(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        Ok(Self::with_config(ScraperConfig::from_file(path)?))
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Override the page budget
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Override the readiness timeout and settle delay
    pub fn with_wait_time(mut self, seconds: u64) -> Self {
        self.config.wait_time_secs = seconds;
        self
    }

    /// Override the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Toggle headless browsing
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrape through a WebDriver browser session
    ///
    /// The output directory is created before the browser is started, so a
    /// bad directory never leaves a session behind.
    pub async fn run(self, cancel: CancellationToken) -> Result<CrawlSummary, ScrapeError> {
        let mut config = self.config;
        config.apply_env_overrides();

        let (mut session, writer) = prepare(&config)?;

        ::log::info!("Connecting to WebDriver at {}", config.webdriver_url);
        let mut fetcher = WebDriverFetcher::connect(&config).await?;

        Ok(crawlers::run(&mut session, &mut fetcher, &writer, &cancel).await)
    }

    /// Scrape with a caller supplied fetcher; it is closed when the run ends
    pub async fn run_with_fetcher<F: PageFetcher + ?Sized>(
        self,
        fetcher: &mut F,
        cancel: CancellationToken,
    ) -> Result<CrawlSummary, ScrapeError> {
        let (mut session, writer) = match prepare(&self.config) {
            Ok(prepared) => prepared,
            Err(e) => {
                fetcher.close().await;
                return Err(e);
            }
        };
        Ok(crawlers::run(&mut session, fetcher, &writer, &cancel).await)
    }
}

/// Validates the configuration and creates the output directory
fn prepare(config: &ScraperConfig) -> Result<(CrawlSession, ContentWriter), ScrapeError> {
    config.validate()?;
    let seed = config.seed_url()?;

    let writer = ContentWriter::create(&config.output_dir)?;
    let filter = AdmissionFilter::with_extensions(seed, &config.excluded_extensions);
    let session = CrawlSession::with_filter(filter, config.max_pages);

    Ok((session, writer))
}
