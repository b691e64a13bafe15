pub mod honeycomb;
pub mod slo_api;
