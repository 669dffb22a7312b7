//! View models computed from a deployment snapshot

pub mod badge;
pub mod filter;
pub mod layout;
pub mod sort;
pub mod stats;
