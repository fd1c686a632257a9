//! Adapters implementing the outbound host port

pub mod in_memory;

pub use in_memory::InMemoryOffscreenHost;
