use std::time::Duration;

use thiserror::Error;

use crate::adapters::honeycomb::DEFAULT_API_URL;

pub const API_URL_VAR: &str = "HONEYCOMB_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "HONEYCOMB_REQUEST_TIMEOUT_SECS";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deployment-wide settings read from the function environment at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub default_api_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("HONEYCOMB_REQUEST_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            default_api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ProviderSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let default_api_url = lookup(API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.default_api_url);

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            None => defaults.request_timeout,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(SettingsError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            default_api_url,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let settings = ProviderSettings::from_lookup(lookup_from(&[])).expect("defaults are valid");
        assert_eq!(settings, ProviderSettings::default());
        assert_eq!(settings.default_api_url, "https://api.honeycomb.io");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let settings = ProviderSettings::from_lookup(lookup_from(&[
            (API_URL_VAR, "https://api.eu1.honeycomb.io"),
            (REQUEST_TIMEOUT_VAR, " 5 "),
        ]))
        .expect("overrides are valid");

        assert_eq!(settings.default_api_url, "https://api.eu1.honeycomb.io");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_timeout() {
        for raw in ["0", "-3", "soon"] {
            let error = ProviderSettings::from_lookup(lookup_from(&[(REQUEST_TIMEOUT_VAR, raw)]))
                .expect_err("timeout should be rejected");
            assert_eq!(error, SettingsError::InvalidTimeout(raw.to_string()));
            assert!(error.to_string().contains(REQUEST_TIMEOUT_VAR));
        }
    }
}
