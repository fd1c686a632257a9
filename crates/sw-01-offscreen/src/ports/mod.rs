//! Hexagonal ports for the offscreen initializer

pub mod inbound;
pub mod outbound;
