//! Primary provider: a hosted text-generation inference endpoint.
//!
//! Request body:
//!
//! ```json
//! { "inputs": "data:image/png;base64,...",
//!   "parameters": { "max_new_tokens": 2048 },
//!   "options": { "wait_for_model": false, "use_cache": false } }
//! ```
//!
//! Accepted response bodies, tried in order:
//!
//! - `[{"generated_text": "..."}]` or `[{"text": "..."}]` (first element wins)
//! - `{"generated_text": "..."}` or `{"text": "..."}`
//! - `"..."` (JSON string), or a raw `text/plain` body
//!
//! Anything else is a [`ProviderError::MalformedResponse`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::error::looks_like_loading;
use super::{ExtractionProvider, ExtractionRequest, ProviderError, ProviderOutcome, non_empty_text};
use crate::{DocsiftError, Result};
use crate::core::config::InferenceProviderConfig;

const PROVIDER_NAME: &str = "inference";

#[derive(Debug, Serialize)]
struct InferencePayload {
    inputs: String,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

/// HTTP client for the primary provider.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct InferenceProvider {
    client: Client,
    endpoint: String,
    token: Option<String>,
    max_new_tokens: u32,
    wait_for_model: bool,
}

impl InferenceProvider {
    /// Build the provider with its own HTTP client.
    ///
    /// The client timeout matches the configured deadline so a stalled
    /// connection is torn down even when the caller does not impose one.
    pub fn new(config: &InferenceProviderConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DocsiftError::http_with_source("Failed to build inference HTTP client", e))?;
        Ok(Self::with_client(client, config, token))
    }

    pub fn with_client(client: Client, config: &InferenceProviderConfig, token: Option<String>) -> Self {
        if config.requires_auth && token.is_none() {
            tracing::warn!("Primary provider requires auth but no API token is configured");
        }

        Self {
            client,
            endpoint: config.endpoint.clone(),
            token: if config.requires_auth { token } else { None },
            max_new_tokens: config.max_new_tokens,
            wait_for_model: config.wait_for_model,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn payload(&self, request: &ExtractionRequest) -> InferencePayload {
        InferencePayload {
            inputs: request.to_data_url(),
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
            },
            options: InferenceOptions {
                wait_for_model: self.wait_for_model,
                use_cache: false,
            },
        }
    }
}

#[async_trait]
impl ExtractionProvider for InferenceProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            provider = PROVIDER_NAME,
            content_type = %request.content_type(),
            size_bytes = request.len(),
        )
    )]
    async fn extract(&self, request: &ExtractionRequest) -> ProviderOutcome {
        let mut builder = self.client.post(&self.endpoint).json(&self.payload(request));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER_NAME, &e))?;

        let status = response.status();
        let is_plain_text = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/plain"));
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER_NAME, &e))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(PROVIDER_NAME, status, &body));
        }

        let text = match serde_json::from_str::<Value>(&body) {
            Ok(value) => parse_inference_response(&value)?,
            Err(_) if is_plain_text => body,
            Err(e) => {
                return Err(ProviderError::MalformedResponse(format!(
                    "{PROVIDER_NAME} returned a non-JSON body: {e}"
                )));
            }
        };

        tracing::debug!(chars = text.chars().count(), "Primary provider returned text");
        non_empty_text(PROVIDER_NAME, text)
    }
}

/// Pull the text out of any accepted response shape.
pub fn parse_inference_response(value: &Value) -> ProviderOutcome {
    match value {
        Value::Array(items) => match items.first() {
            Some(first @ Value::Object(_)) => text_field(first),
            Some(_) => Err(malformed("array element is not an object")),
            None => Err(malformed("empty array")),
        },
        Value::Object(map) => {
            if let Some(error) = map.get("error") {
                let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
                return Err(if looks_like_loading(&message) {
                    ProviderError::ProviderWarmingUp(format!("{PROVIDER_NAME}: {message}"))
                } else {
                    ProviderError::MalformedResponse(format!("{PROVIDER_NAME} reported an error: {message}"))
                });
            }
            text_field(value)
        }
        Value::String(text) => Ok(text.clone()),
        _ => Err(malformed("unexpected JSON type")),
    }
}

fn text_field(object: &Value) -> ProviderOutcome {
    ["generated_text", "text"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| malformed("object has no 'generated_text' or 'text' field"))
}

fn malformed(reason: &str) -> ProviderError {
    ProviderError::MalformedResponse(format!("{PROVIDER_NAME}: {reason}"))
}
