use crate::client::types::{value_to_label, ApiErrorBody};
use serde_json::Value;

/// Every way a backend call can fail, collapsed into one type at the client boundary.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid API URL for {endpoint}: {reason}")]
    InvalidUrl { endpoint: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `message` is the backend `detail` when present.
    #[error("{message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response shape from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RequestError {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::InvalidUrl { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_status(endpoint: &str, status: u16, body: &str) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
            message: status_message(status, body),
        }
    }
}

/// Backend `detail` if the body carries one, else `API Error: {status}`.
pub fn status_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| match detail {
            Value::Null => None,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => value_to_label(&detail),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("API Error: {status}"))
}
