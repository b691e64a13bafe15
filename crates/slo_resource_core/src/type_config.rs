use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::HandlerError;

#[derive(Deserialize)]
struct ResourceTypeConfig {
    #[serde(rename = "HoneycombConfig")]
    honeycomb_config: Option<HoneycombConfig>,
}

#[derive(Deserialize)]
struct HoneycombConfig {
    #[serde(rename = "ApiKey", default)]
    api_key: Option<String>,
    #[serde(rename = "ApiUrl", default)]
    api_url: Option<String>,
}

/// Credentials for the remote API, extracted from the type configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_url: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Parses `{"HoneycombConfig": {"ApiKey": ..., "ApiUrl": ...}}`.
///
/// The flat `{"ApiKey": ...}` layout is not accepted.
pub fn parse_type_configuration(raw: Option<&Value>) -> Result<ClientConfig, HandlerError> {
    let raw = match raw {
        Some(Value::Null) | None => {
            return Err(HandlerError::configuration(
                "unable to parse resource type configuration: type configuration is not set",
            ))
        }
        Some(value) => value,
    };

    let parsed = ResourceTypeConfig::deserialize(raw).map_err(|error| {
        HandlerError::configuration(format!(
            "unable to parse resource type configuration: {error}"
        ))
    })?;

    let honeycomb = parsed.honeycomb_config.ok_or_else(|| {
        HandlerError::configuration(
            "unable to parse resource type configuration: HoneycombConfig is required",
        )
    })?;

    let api_key = honeycomb
        .api_key
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            HandlerError::configuration(
                "unable to parse resource type configuration: HoneycombConfig.ApiKey is required",
            )
        })?;

    let api_url = honeycomb
        .api_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(ClientConfig { api_key, api_url })
}
