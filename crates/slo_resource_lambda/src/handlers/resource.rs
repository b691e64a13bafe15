use serde_json::Value;
use slo_resource_core::contract::{normalize_event, Action, ProgressEvent, ResourceRequest};
use slo_resource_core::error::{ApiError, HandlerError};
use slo_resource_core::mapping::{apply_slo, required_dataset, required_id, slo_from_model};
use slo_resource_core::type_config::parse_type_configuration;
use tracing::{error, info, warn};

use crate::adapters::slo_api::{ClientFactory, SloApi};

const CREATE_CONTEXT: &str = "unable to create SLO";
const READ_CONTEXT: &str = "unable to fetch SLO";
const UPDATE_CONTEXT: &str = "unable to update SLO";
const DELETE_CONTEXT: &str = "unable to delete SLO";

/// One lifecycle operation of a resource type.
pub trait ResourceHandler {
    fn execute(
        &self,
        action: Action,
        request: &ResourceRequest,
    ) -> Result<ProgressEvent, HandlerError>;
}

/// Lifecycle handlers for the SLO resource. Every call builds a fresh client.
pub struct SloResourceHandler<F> {
    client_factory: F,
}

impl<F: ClientFactory> SloResourceHandler<F> {
    pub fn new(client_factory: F) -> Self {
        Self { client_factory }
    }

    fn connect(&self, request: &ResourceRequest) -> Result<Box<dyn SloApi>, HandlerError> {
        let config = parse_type_configuration(request.type_configuration.as_ref())?;
        self.client_factory.connect(&config)
    }

    fn create(&self, request: &ResourceRequest) -> Result<ProgressEvent, HandlerError> {
        let client = self.connect(request)?;
        let mut model = request.current_model.clone();
        let dataset = required_dataset(&model)?;
        let slo = slo_from_model(&model, false)?;

        let created = client
            .create(dataset, &slo)
            .map_err(|source| HandlerError::api(CREATE_CONTEXT, source))?;
        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                HandlerError::api(
                    CREATE_CONTEXT,
                    ApiError::Decode("response did not include an SLO id".to_string()),
                )
            })?;

        info!(dataset, slo_id = %id, "created SLO");
        model.id = Some(id);
        Ok(ProgressEvent::success("Create Complete", model))
    }

    fn read(&self, request: &ResourceRequest) -> Result<ProgressEvent, HandlerError> {
        let client = self.connect(request)?;
        let mut model = request.current_model.clone();
        let dataset = required_dataset(&model)?;
        let id = required_id(&model)?;

        let slo = client
            .get(dataset, id)
            .map_err(|source| HandlerError::api(READ_CONTEXT, source))?;

        apply_slo(&mut model, &slo);
        Ok(ProgressEvent::success("Read Complete", model))
    }

    fn update(&self, request: &ResourceRequest) -> Result<ProgressEvent, HandlerError> {
        let client = self.connect(request)?;
        let model = &request.current_model;
        let dataset = required_dataset(model)?;
        let slo = slo_from_model(model, true)?;

        client
            .update(dataset, &slo)
            .map_err(|source| HandlerError::api(UPDATE_CONTEXT, source))?;

        info!(dataset, slo_id = ?slo.id, "updated SLO");
        Ok(ProgressEvent::success("Update Complete", model.clone()))
    }

    fn delete(&self, request: &ResourceRequest) -> Result<ProgressEvent, HandlerError> {
        let client = self.connect(request)?;
        let model = &request.current_model;
        let dataset = required_dataset(model)?;
        let id = required_id(model)?;

        client
            .delete(dataset, id)
            .map_err(|source| HandlerError::api(DELETE_CONTEXT, source))?;

        info!(dataset, slo_id = id, "deleted SLO");
        Ok(ProgressEvent::success("Delete Complete", model.clone()))
    }
}

impl<F: ClientFactory> ResourceHandler for SloResourceHandler<F> {
    fn execute(
        &self,
        action: Action,
        request: &ResourceRequest,
    ) -> Result<ProgressEvent, HandlerError> {
        match action {
            Action::Create => self.create(request),
            Action::Read => self.read(request),
            Action::Update => self.update(request),
            Action::Delete => self.delete(request),
            // Listing is not supported by this resource; echo the model back.
            Action::List => Ok(ProgressEvent::success(
                "List Complete",
                request.current_model.clone(),
            )),
        }
    }
}

/// Host-facing entry point: never fails, errors become FAILED progress events.
pub fn handle_event(event: Value, handler: &dyn ResourceHandler) -> ProgressEvent {
    let (action, request) = match normalize_event(event) {
        Ok(value) => value,
        Err(message) => {
            warn!(error = %message, "rejected handler event");
            return ProgressEvent::failed(message);
        }
    };

    let bearer_token = request.bearer_token.clone();
    let response = match handler.execute(action, &request) {
        Ok(response) => {
            info!(
                action = action.as_str(),
                logical_resource_id = ?request.logical_resource_id,
                "operation complete"
            );
            response
        }
        Err(failure) => {
            let status = match &failure {
                HandlerError::Api { source, .. } => source.status(),
                _ => None,
            };
            error!(
                action = action.as_str(),
                logical_resource_id = ?request.logical_resource_id,
                status,
                error = %failure,
                "operation failed"
            );
            ProgressEvent::failed(failure.to_string())
        }
    };

    response.with_bearer_token(bearer_token)
}
