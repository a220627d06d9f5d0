use shared::error::BackendRejection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("invalid api url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Rejected(#[from] BackendRejection),
}

impl ControlError {
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(rejection) => rejection.message.as_deref(),
            _ => None,
        }
    }
}
