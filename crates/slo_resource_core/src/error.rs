use thiserror::Error;

/// Failure of a single call against the remote SLO API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("{status} {message}")]
    Status { status: u16, message: String },
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything a lifecycle operation can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Configuration(String),
    #[error("{context}: {source}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },
    #[error("resource model is missing required property {0}")]
    MissingProperty(&'static str),
    #[error("resource model property {property} is invalid: {reason}")]
    InvalidProperty {
        property: &'static str,
        reason: String,
    },
}

impl HandlerError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn api(context: &'static str, source: ApiError) -> Self {
        Self::Api { context, source }
    }
}
