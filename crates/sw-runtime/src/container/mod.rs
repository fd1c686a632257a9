//! # Service Container
//!
//! Configuration plus the wiring that turns it into a dispatcher and an
//! offscreen initializer.

pub mod config;
pub mod services;

pub use config::{ConfigError, FetchConfig, RuntimeConfig};
pub use services::{build_registry, ServiceContainer};
