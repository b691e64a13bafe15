use slo_resource_core::error::{ApiError, HandlerError};
use slo_resource_core::model::Slo;
use slo_resource_core::type_config::ClientConfig;

/// Dataset-scoped SLO operations of the remote service.
pub trait SloApi {
    fn create(&self, dataset: &str, slo: &Slo) -> Result<Slo, ApiError>;
    fn get(&self, dataset: &str, id: &str) -> Result<Slo, ApiError>;
    fn update(&self, dataset: &str, slo: &Slo) -> Result<Slo, ApiError>;
    fn delete(&self, dataset: &str, id: &str) -> Result<(), ApiError>;
}

/// Builds a client for one invocation from the type configuration credentials.
pub trait ClientFactory {
    fn connect(&self, config: &ClientConfig) -> Result<Box<dyn SloApi>, HandlerError>;
}
