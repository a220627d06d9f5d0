use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandAck {
    pub fn success() -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    pub fn into_result(self) -> Result<(), BackendRejection> {
        if self.is_success() {
            Ok(())
        } else {
            Err(BackendRejection {
                message: self.error,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend rejected command: {}", .message.as_deref().unwrap_or("no error text"))]
pub struct BackendRejection {
    pub message: Option<String>,
}

impl BackendRejection {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}
