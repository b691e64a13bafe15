//! Domain primitives for the Honeycomb SLO CloudFormation resource.
//!
//! This crate owns the resource model, the remote SLO entity, the mapping
//! between the two and the request/response contract with the CloudFormation
//! host. It intentionally excludes HTTP transport and Lambda runtime concerns.

pub mod contract;
pub mod conversion;
pub mod error;
pub mod mapping;
pub mod model;
pub mod type_config;
