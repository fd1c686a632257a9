//! # Action Handlers
//!
//! One module per [`ActionKind`](sw_02_dispatch::ActionKind).

pub mod fetch_icon;

pub use fetch_icon::{extract_icon_urls, fallback_icon_url, FetchIconHandler};
