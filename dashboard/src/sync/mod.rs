//! Snapshot refresh

pub mod refresher;
