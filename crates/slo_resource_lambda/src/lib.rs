//! Lambda-facing adapters and handlers for the Honeycomb SLO resource.
//!
//! This crate owns runtime integration details (the host entry point, the
//! Honeycomb HTTP client, deployment settings) on top of the pure domain types
//! in `slo_resource_core`.

pub mod adapters;
pub mod handlers;
pub mod settings;
