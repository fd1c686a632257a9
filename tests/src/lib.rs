//! # Service Worker Test Suite
//!
//! Cross-crate scenarios for the background process.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bootstrap.rs       # Runtime startup and offscreen single-flight
//!     └── dispatch_flows.rs  # Request → envelope flows through the listener
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sw-tests
//! cargo test -p sw-tests integration::dispatch_flows
//! ```

pub mod integration;
