//! Fallback provider: a Gradio-style prediction endpoint.
//!
//! Inputs are positional: `{"data": [payload, instruction, model_tag]}`.
//! The response mirrors that: `{"data": [text, ...]}`, where only the first
//! element is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::looks_like_loading;
use super::{ExtractionProvider, ExtractionRequest, ProviderError, ProviderOutcome, non_empty_text};
use crate::{DocsiftError, Result};
use crate::core::config::GradioProviderConfig;

const PROVIDER_NAME: &str = "gradio";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    data: [&'a str; 3],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<Value>,
}

/// HTTP client for the fallback provider.
#[derive(Debug, Clone)]
pub struct GradioProvider {
    client: Client,
    endpoint: String,
    instruction: String,
    model_tag: String,
    token: Option<String>,
}

impl GradioProvider {
    pub fn new(config: &GradioProviderConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DocsiftError::http_with_source("Failed to build gradio HTTP client", e))?;
        Ok(Self::with_client(client, config, token))
    }

    pub fn with_client(client: Client, config: &GradioProviderConfig, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            instruction: config.instruction.clone(),
            model_tag: config.model_tag.clone(),
            token: if config.requires_auth { token } else { None },
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExtractionProvider for GradioProvider {
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
        let payload = request.to_data_url();
        let body = PredictRequest {
            data: [payload.as_str(), self.instruction.as_str(), self.model_tag.as_str()],
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER_NAME, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(PROVIDER_NAME, &e))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(PROVIDER_NAME, status, &body));
        }

        let text = parse_predict_response(&body)?;
        tracing::debug!(chars = text.chars().count(), "Fallback provider returned text");
        non_empty_text(PROVIDER_NAME, text)
    }
}

/// Extract the first output from a prediction response body.
pub fn parse_predict_response(body: &str) -> ProviderOutcome {
    let response: PredictResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("{PROVIDER_NAME} returned invalid JSON: {e}")))?;

    if let Some(error) = response.error.filter(|e| !e.is_null()) {
        let message = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
        return Err(if looks_like_loading(&message) {
            ProviderError::ProviderWarmingUp(format!("{PROVIDER_NAME}: {message}"))
        } else {
            ProviderError::MalformedResponse(format!("{PROVIDER_NAME} reported an error: {message}"))
        });
    }

    match response.data.as_deref() {
        Some([Value::String(text), ..]) => Ok(text.clone()),
        Some([_, ..]) => Err(ProviderError::MalformedResponse(format!(
            "{PROVIDER_NAME}: first output is not a string"
        ))),
        Some([]) => Err(ProviderError::MalformedResponse(format!(
            "{PROVIDER_NAME}: response has no outputs"
        ))),
        None => Err(ProviderError::MalformedResponse(format!(
            "{PROVIDER_NAME}: response has no 'data' field"
        ))),
    }
}
