use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Expected per-page failure reported by a [`PageFetcher`]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("{url} was not ready after {timeout_secs}s")]
    NotReady { url: String, timeout_secs: u64 },

    #[error("failed to read rendered source of {url}: {message}")]
    Source { url: String, message: String },

    #[error("fetcher already closed, cannot load {url}")]
    Closed { url: String },
}

impl FetchError {
    /// URL of the page that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Navigation { url, .. }
            | FetchError::NotReady { url, .. }
            | FetchError::Source { url, .. }
            | FetchError::Closed { url } => url,
        }
    }
}

/// Turns a URL into rendered markup
///
/// `fetch` blocks until the page is ready and has settled. Implementations
/// own an external resource that is released by `close`, which the crawl
/// controller calls exactly once when the run ends.
#[async_trait]
pub trait PageFetcher: Send {
    /// Load `url` and return its rendered markup
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError>;

    /// Release the underlying resource
    async fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_reports_its_url() {
        let errors = [
            FetchError::Navigation {
                url: "https://example.com/a".to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            },
            FetchError::NotReady {
                url: "https://example.com/a".to_string(),
                timeout_secs: 5,
            },
            FetchError::Source {
                url: "https://example.com/a".to_string(),
                message: "session gone".to_string(),
            },
            FetchError::Closed {
                url: "https://example.com/a".to_string(),
            },
        ];

        for error in &errors {
            assert_eq!(error.url(), "https://example.com/a");
            assert!(error.to_string().contains("https://example.com/a"));
        }
    }
}
