use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use slo_resource_core::contract::ProgressEvent;
use slo_resource_lambda::adapters::honeycomb::HoneycombClientFactory;
use slo_resource_lambda::handlers::resource::{handle_event, SloResourceHandler};
use slo_resource_lambda::settings::ProviderSettings;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_current_span(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let settings = ProviderSettings::from_env().map_err(|error| Error::from(error.to_string()))?;
    info!(
        default_api_url = %settings.default_api_url,
        request_timeout_secs = settings.request_timeout.as_secs(),
        "starting SLO resource handler"
    );

    let handler = SloResourceHandler::new(HoneycombClientFactory::new(&settings));
    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ProgressEvent, Error>(handle_event(event.payload, handler))
    }))
    .await
}
