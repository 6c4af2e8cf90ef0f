//! Outbound HTTP capability shared by the lookup and completion clients.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;

/// Non-2xx response from an upstream service.
#[derive(Debug, thiserror::Error)]
#[error("HTTP {status}: {body}")]
pub struct HttpStatusError {
    pub status: StatusCode,
    pub body: String,
    /// `error.message` from the response body, when the service sent one
    pub service_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Plain(String),
}

impl HttpStatusError {
    /// Drain a failed response into an error, keeping any service message.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));

        Self::new(status, body)
    }

    pub fn new(status: StatusCode, body: String) -> Self {
        let service_message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| match envelope.error {
                ErrorBody::Detailed { message } => message,
                ErrorBody::Plain(message) => message,
            })
            .filter(|m| !m.trim().is_empty());

        Self {
            status,
            body,
            service_message,
        }
    }

    /// Rate limits and server errors are worth another try; other 4xx are not.
    pub fn is_transient(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS || self.status.is_server_error()
    }
}

/// Build the client both upstream calls go through.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Retry predicate for `anyhow` errors produced by the upstream calls.
///
/// Status errors are retried only when transient. Otherwise only transport
/// failures (connect, timeout, request errors) are retried; a body that
/// fails to decode or carries no answer would fail the same way again.
pub fn is_retryable(error: &anyhow::Error) -> bool {
    if let Some(status_error) = error.downcast_ref::<HttpStatusError>() {
        return status_error.is_transient();
    }

    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .any(|e| e.is_timeout() || e.is_connect() || e.is_request())
}

/// Prefer the service's own error message over the transport error chain.
pub fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<HttpStatusError>() {
        Some(HttpStatusError {
            service_message: Some(message),
            ..
        }) => message.clone(),
        _ => format!("{:#}", error),
    }
}
