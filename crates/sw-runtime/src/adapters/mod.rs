//! # Adapters
//!
//! - `page_fetcher`: HTTP access for the icon handler
//! - `stdio`: standalone host speaking newline delimited JSON

pub mod page_fetcher;
pub mod stdio;

pub use page_fetcher::{FetchError, FetchedPage, PageFetcher, ReqwestPageFetcher, StaticPageFetcher};
pub use stdio::{StdioHost, StdioReply, StdioSummary};
