//! Hexagonal ports for the dispatcher

pub mod inbound;
pub mod outbound;
