//! Octopus Deploy resource models
//!
//! Only the fields the dashboard reads are modelled; everything else in the
//! upstream payloads is ignored on deserialization.

pub mod models;

pub use models::*;
