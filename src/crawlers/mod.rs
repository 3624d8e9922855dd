pub mod fetcher;
pub mod frontier;
pub mod session;
pub mod web;

pub use fetcher::{FetchError, PageFetcher};
pub use frontier::Frontier;
pub use session::{CrawlSession, run};
pub use web::WebDriverFetcher;
