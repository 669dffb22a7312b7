//! Server-side proxy to the Octopus Deploy API

pub mod config;
pub mod forward;
pub mod request;
