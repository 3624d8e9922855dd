use crate::ScrapeError;
use crate::config::ScraperConfig;
use crate::crawlers::fetcher::{FetchError, PageFetcher};
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;
use url::Url;

/// Chrome flags used for every session
const CHROME_ARGS: [&str; 4] = [
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--window-size=1920,1080",
    "--log-level=3",
];

/// Common local WebDriver endpoints tried when the configured one fails
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Page fetcher backed by a browser driven over WebDriver
///
/// Every fetch navigates to the URL, waits up to `wait_time` for a `body`
/// element, then sleeps `wait_time` again so scripts can finish rendering.
pub struct WebDriverFetcher {
    client: Option<Client>,
    wait_time: Duration,
}

impl WebDriverFetcher {
    /// Open a browser session according to `config`
    pub async fn connect(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let capabilities = browser_capabilities(config.headless);
        let client = connect_to_webdriver(&config.webdriver_url, &capabilities).await?;

        // Bound navigation so a hanging page cannot outlive the browser default
        let timeouts = TimeoutConfiguration::new(None, Some(config.page_load_timeout()), None);
        if let Err(e) = client.update_timeouts(timeouts).await {
            ::log::warn!("Failed to set page load timeout: {}", e);
        }

        Ok(Self {
            client: Some(client),
            wait_time: config.wait_time(),
        })
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        let Some(client) = self.client.as_ref() else {
            return Err(FetchError::Closed {
                url: url.to_string(),
            });
        };

        client
            .goto(url.as_str())
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;

        client
            .wait()
            .at_most(self.wait_time)
            .for_element(Locator::Css("body"))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => FetchError::NotReady {
                    url: url.to_string(),
                    timeout_secs: self.wait_time.as_secs(),
                },
                other => navigation_error(other, "waiting for", url),
            })?;

        // Settle delay for dynamic content
        tokio::time::sleep(self.wait_time).await;

        client
            .source()
            .await
            .map_err(|e| FetchError::Source {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            match client.close().await {
                Ok(()) => ::log::debug!("WebDriver session closed"),
                Err(e) => ::log::warn!("Failed to close WebDriver session: {}", e),
            }
        }
    }
}

/// Capabilities requesting a Chrome session with the scraper's flags
fn browser_capabilities(headless: bool) -> Map<String, Value> {
    let mut args: Vec<&str> = Vec::with_capacity(CHROME_ARGS.len() + 1);
    if headless {
        args.push("--headless");
    }
    args.extend(CHROME_ARGS);

    let mut capabilities = Map::new();
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": args,
            "excludeSwitches": ["enable-logging"],
        }),
    );
    capabilities
}

/// Connects to the WebDriver instance, trying common local endpoints on failure
async fn connect_to_webdriver(
    webdriver_url: &str,
    capabilities: &Map<String, Value>,
) -> Result<Client, ScrapeError> {
    let first_error = match try_connect(webdriver_url, capabilities).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = try_connect(url, capabilities).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(ScrapeError::WebDriver {
        url: webdriver_url.to_string(),
        message: first_error,
    })
}

async fn try_connect(
    webdriver_url: &str,
    capabilities: &Map<String, Value>,
) -> Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder
        .connect(webdriver_url)
        .await
        .map_err(|e| e.to_string())
}

/// Maps a WebDriver command error to a navigation failure
fn navigation_error(error: CmdError, context: &str, url: &Url) -> FetchError {
    let message = error.to_string();
    if message.contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while {} {}", context, url);
    }
    FetchError::Navigation {
        url: url.to_string(),
        message,
    }
}
