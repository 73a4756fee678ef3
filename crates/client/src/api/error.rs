//! Error types for the CRM API client.

use thiserror::Error;

use crate::credentials::StoreError;

/// Message shown when a failed response carries no usable detail.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Errors that can occur when interacting with the CRM API.
///
/// A 401 response is not an error: it surfaces as
/// [`Outcome::Redirect`](super::Outcome::Redirect).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// Displays exactly the backend-supplied message so it can be shown to
    /// the user as-is.
    #[error("{message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Backend `detail`, or [`GENERIC_FAILURE`].
        message: String,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response carried a body of the wrong shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The credential store failed.
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backend rejected the request.
    RequestFailed,
    /// Transport failure.
    Network,
    /// Backend answered with an unexpected body.
    Decode,
    /// Local failure before or after the exchange (store, URL building).
    Local,
}

impl ApiError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::Network(_) => ErrorKind::Network,
            Self::Decode(_) => ErrorKind::Decode,
            Self::InvalidUrl(_) | Self::Store(_) => ErrorKind::Local,
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable failure description.
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Extract a display message from a raw error body.
    ///
    /// `detail` may be a string or, for validation failures, a list of
    /// objects carrying `msg`. Anything else yields [`GENERIC_FAILURE`].
    #[must_use]
    pub fn message_from_body(body: &str) -> String {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|response| response.detail)
            .and_then(|detail| detail_message(&detail))
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
    }
}

fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
