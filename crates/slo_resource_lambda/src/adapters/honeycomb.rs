use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde_json::Value;
use slo_resource_core::error::{ApiError, HandlerError};
use slo_resource_core::model::Slo;
use slo_resource_core::type_config::ClientConfig;

use crate::adapters::slo_api::{ClientFactory, SloApi};
use crate::settings::ProviderSettings;

pub const DEFAULT_API_URL: &str = "https://api.honeycomb.io";
const API_KEY_HEADER: &str = "X-Honeycomb-Team";
const USER_AGENT: &str = concat!("slo-resource-provider/", env!("CARGO_PKG_VERSION"));

/// Thin HTTP client for the Honeycomb SLO endpoints.
pub struct HoneycombClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HoneycombClient {
    pub fn new(
        config: &ClientConfig,
        default_api_url: &str,
        timeout: Duration,
    ) -> Result<Self, HandlerError> {
        let api_url = config.api_url.as_deref().unwrap_or(default_api_url);
        let base_url = Url::parse(api_url).map_err(|error| {
            HandlerError::configuration(format!(
                "unable to initialize client: invalid API URL {api_url:?}: {error}"
            ))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(HandlerError::configuration(format!(
                "unable to initialize client: API URL {api_url:?} must be an absolute http(s) URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| {
                HandlerError::configuration(format!("unable to initialize client: {error}"))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn slo_url(&self, dataset: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            // `new` only accepts base URLs that can carry a path, so this cannot fail.
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Request("API URL cannot carry a path".to_string()))?;
            segments.pop_if_empty().extend(["1", "slos", dataset]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Slo>) -> Result<Response, ApiError> {
        let mut request = self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(status, &text),
        })
    }

    async fn send_for_slo(
        &self,
        method: Method,
        url: Url,
        body: Option<&Slo>,
    ) -> Result<Slo, ApiError> {
        self.send(method, url, body)
            .await?
            .json::<Slo>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }
}

impl SloApi for HoneycombClient {
    fn create(&self, dataset: &str, slo: &Slo) -> Result<Slo, ApiError> {
        let url = self.slo_url(dataset, None)?;
        block_on(self.send_for_slo(Method::POST, url, Some(slo)))
    }

    fn get(&self, dataset: &str, id: &str) -> Result<Slo, ApiError> {
        let url = self.slo_url(dataset, Some(id))?;
        block_on(self.send_for_slo(Method::GET, url, None))
    }

    fn update(&self, dataset: &str, slo: &Slo) -> Result<Slo, ApiError> {
        let id = slo
            .id
            .as_deref()
            .ok_or_else(|| ApiError::Request("SLO id is required for update".to_string()))?;
        let url = self.slo_url(dataset, Some(id))?;
        block_on(self.send_for_slo(Method::PUT, url, Some(slo)))
    }

    fn delete(&self, dataset: &str, id: &str) -> Result<(), ApiError> {
        let url = self.slo_url(dataset, Some(id))?;
        block_on(self.send(Method::DELETE, url, None)).map(|_| ())
    }
}

/// Creates a [`HoneycombClient`] per invocation.
#[derive(Debug, Clone)]
pub struct HoneycombClientFactory {
    default_api_url: String,
    timeout: Duration,
}

impl HoneycombClientFactory {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            default_api_url: settings.default_api_url.clone(),
            timeout: settings.request_timeout,
        }
    }
}

impl ClientFactory for HoneycombClientFactory {
    fn connect(&self, config: &ClientConfig) -> Result<Box<dyn SloApi>, HandlerError> {
        let client = HoneycombClient::new(config, &self.default_api_url, self.timeout)?;
        Ok(Box::new(client))
    }
}

// Handlers are synchronous; they run inside the multi-threaded Lambda runtime.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["error", "title"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
