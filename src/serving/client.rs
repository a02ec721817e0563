/// Model serving HTTP client implementation.
///
/// This module provides `ServingClient` for making synchronous generation
/// requests against a hosted model-serving gateway, along with error types
/// and a builder pattern for configuration. One request, one full answer
/// string; no streaming and no automatic retry. A failed generation is the
/// caller's to surface.
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Path under the workspace host where serving endpoints live.
const SERVING_BASE_PATH: &str = "/serving-endpoints";

/// Errors that can occur when calling the model serving gateway.
#[derive(Debug, Error)]
pub enum ServingError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors, carrying the gateway's message when one was returned
    #[error("Serving gateway HTTP error: status {status}: {message}")]
    Http { status: u16, message: String },

    /// Responses the gateway should never produce
    #[error("Serving gateway API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Builder for constructing `ServingClient` instances.
///
/// # Examples
///
/// ```
/// use vintner::serving::ServingClientBuilder;
///
/// let client = ServingClientBuilder::new()
///     .host("https://adb-123.azuredatabricks.net")
///     .token("dapi-example")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct ServingClientBuilder {
    host: Option<String>,
    token: Option<String>,
}

impl ServingClientBuilder {
    /// Creates a new `ServingClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace base URL.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the bearer token used to authenticate requests.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds the `ServingClient` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `ServingError::InvalidUrl` if the host is missing or does not
    /// parse as a URL, and `ServingError::Network` if the underlying HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<ServingClient, ServingError> {
        let host = self
            .host
            .ok_or_else(|| ServingError::InvalidUrl("host is not set".to_string()))?;

        // Validate URL
        reqwest::Url::parse(&host)
            .map_err(|e| ServingError::InvalidUrl(format!("{host}: {e}")))?;

        // Create reqwest blocking client with timeout configuration
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(ServingError::Network)?;

        Ok(ServingClient {
            client,
            base_url: format!("{}{SERVING_BASE_PATH}", host.trim_end_matches('/')),
            token: self.token.unwrap_or_default(),
        })
    }
}

/// Synchronous HTTP client for the model serving gateway.
///
/// Speaks the gateway's OpenAI-compatible chat-completions surface. Model
/// selection happens per request, so one client serves every model in the
/// picker.
pub struct ServingClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

/// Trait for model serving operations.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// for issuing generation requests.
pub trait ServingClientTrait: Send + Sync {
    /// Generates an answer for the prompt using the named model.
    ///
    /// The prompt may be a fully composed instruction or a raw question;
    /// the client does not distinguish.
    ///
    /// # Errors
    ///
    /// Network, auth, and model-side failures surface as `ServingError`
    /// carrying the underlying message. No automatic retry happens here.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ServingError>;
}

impl ServingClient {
    /// Returns the serving base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one chat-completions request and extracts the answer text.
    fn generate_internal(&self, model: &str, prompt: &str) -> Result<String, ServingError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = serde_json::json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
        });

        debug!(%model, "sending generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .map_err(ServingError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServingError::Http {
                status: status.as_u16(),
                message: gateway_message(response),
            });
        }

        let json: serde_json::Value = response.json().map_err(ServingError::Network)?;

        // Extract the first choice's message content
        json.get("choices")
            .and_then(|c| c.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ServingError::Api {
                message: "Missing message content in gateway response".to_string(),
            })
    }
}

impl ServingClientTrait for ServingClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ServingError> {
        self.generate_internal(model, prompt)
    }
}

/// Pulls a human-readable message out of a gateway error response.
///
/// The gateway reports errors as JSON with a `message` field; anything else
/// falls back to the raw body, trimmed.
fn gateway_message(response: reqwest::blocking::Response) -> String {
    let body = response.text().unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}
