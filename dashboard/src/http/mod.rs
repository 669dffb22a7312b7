//! Upstream HTTP access

pub mod client;
pub mod octopus;
