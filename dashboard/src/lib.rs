//! Octodash Library
//!
//! Deployment dashboard over the Octopus Deploy API: an authenticated proxy,
//! the deployment data service, and the table and 3D view models.

pub mod app;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod proxy;
pub mod server;
pub mod services;
pub mod sync;
pub mod utils;
pub mod view;
pub mod workers;
