//! Upstream data services

pub mod deployments;
pub mod feasibility;
