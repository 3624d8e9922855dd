use crate::crawlers::fetcher::PageFetcher;
use crate::crawlers::frontier::Frontier;
use crate::filter::AdmissionFilter;
use crate::parsers::Parser;
use crate::results::CrawlSummary;
use crate::writer::ContentWriter;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// State of one crawl run: frontier, visited set and page budget
///
/// URLs only enter the frontier if they are neither visited nor already
/// queued, and a URL becomes visited once its step has finished.
#[derive(Debug)]
pub struct CrawlSession {
    filter: AdmissionFilter,
    frontier: Frontier,
    visited: HashSet<Url>,
    max_pages: usize,
}

impl CrawlSession {
    /// Start a session at `seed` with the default admission filter
    pub fn new(seed: Url, max_pages: usize) -> Self {
        Self::with_filter(AdmissionFilter::new(seed), max_pages)
    }

    /// Start a session at the filter's seed URL
    pub fn with_filter(filter: AdmissionFilter, max_pages: usize) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(filter.seed().clone());
        Self {
            filter,
            frontier,
            visited: HashSet::new(),
            max_pages,
        }
    }

    /// Whether there is work left within the budget
    pub fn is_running(&self) -> bool {
        !self.frontier.is_empty() && self.visited.len() < self.max_pages
    }

    /// Dequeue the next URL that has not been visited yet
    ///
    /// Already visited URLs are dropped without counting against the budget.
    pub fn next_url(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop() {
            if self.visited.contains(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }
            return Some(url);
        }
        None
    }

    /// Record `url` as processed; returns false if it already was
    pub fn mark_visited(&mut self, url: Url) -> bool {
        self.visited.insert(url)
    }

    /// Queue every admissible link that is neither visited nor queued
    ///
    /// Links keep the order in which they were discovered. Returns how many
    /// were added.
    pub fn enqueue_links(&mut self, links: impl IntoIterator<Item = Url>) -> usize {
        let mut added = 0;
        for link in links {
            if !self.filter.is_admissible(&link) {
                ::log::debug!("URL filter rejected: {}", link);
                continue;
            }
            if self.visited.contains(&link) {
                ::log::trace!("Skipping already visited link: {}", link);
                continue;
            }
            if self.frontier.push(link) {
                added += 1;
            }
        }
        added
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn seed(&self) -> &Url {
        self.filter.seed()
    }
}

/// Runs the crawl loop and then releases the fetcher
///
/// `fetcher.close()` is awaited exactly once, whether the loop ended because
/// the budget ran out, the frontier drained, or `cancel` was triggered.
pub async fn run<F: PageFetcher + ?Sized>(
    session: &mut CrawlSession,
    fetcher: &mut F,
    writer: &ContentWriter,
    cancel: &CancellationToken,
) -> CrawlSummary {
    ::log::info!(
        "Starting to scrape {} into {} (max {} pages)",
        session.seed(),
        writer.output_dir().display(),
        session.max_pages()
    );

    let mut summary = crawl(session, fetcher, writer, cancel).await;

    fetcher.close().await;

    summary.pages_visited = session.visited_count();
    summary.pages_queued = session.frontier().len();
    ::log::info!(
        "Scraping finished: {} pages visited, {} written, {} still queued",
        summary.pages_visited,
        summary.pages_written,
        summary.pages_queued
    );
    summary
}

async fn crawl<F: PageFetcher + ?Sized>(
    session: &mut CrawlSession,
    fetcher: &mut F,
    writer: &ContentWriter,
    cancel: &CancellationToken,
) -> CrawlSummary {
    let mut summary = CrawlSummary::default();

    while session.is_running() {
        if cancel.is_cancelled() {
            ::log::warn!("Scraping interrupted by user");
            summary.interrupted = true;
            break;
        }

        let Some(url) = session.next_url() else {
            break;
        };

        visit(session, fetcher, writer, &url, &mut summary).await;
        session.mark_visited(url);

        ::log::info!(
            "Progress: {}/{} pages, {} URLs in queue",
            session.visited_count(),
            session.max_pages(),
            session.frontier().len()
        );
    }

    summary
}

/// One step: fetch, write the text, queue the links
async fn visit<F: PageFetcher + ?Sized>(
    session: &mut CrawlSession,
    fetcher: &mut F,
    writer: &ContentWriter,
    url: &Url,
    summary: &mut CrawlSummary,
) {
    ::log::info!("Scraping: {}", url);

    let markup = match fetcher.fetch(url).await {
        Ok(markup) => markup,
        Err(e) => {
            ::log::error!("Error scraping {}: {}", url, e);
            summary.fetch_failures += 1;
            return;
        }
    };

    let page = Parser::parse(&markup, url);

    if page.has_text() {
        match writer.write(url, &page.text_blocks) {
            Ok(path) => {
                summary.pages_written += 1;
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                ::log::info!(
                    "Saved to {} ({:.1} KB, {} blocks)",
                    path.display(),
                    size as f64 / 1024.0,
                    page.text_blocks.len()
                );
            }
            Err(e) => {
                ::log::error!("Failed to save {}: {}", url, e);
                summary.write_failures += 1;
            }
        }
    } else {
        ::log::info!("No text content found on {}", url);
        summary.pages_empty += 1;
    }

    let added = session.enqueue_links(page.links);
    ::log::debug!("Queued {} new links from {}", added, url);
}
