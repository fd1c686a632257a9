//! Integration scenarios

pub mod bootstrap;
pub mod dispatch_flows;
