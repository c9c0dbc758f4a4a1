//! Gemini completion backend.
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`).
//! Result shapes map onto `generationConfig.responseSchema` with a JSON
//! response MIME type, so arrays are supported natively.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::traits::*;

/// Public Generative Language endpoint.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini backend.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Option<Duration>,
}

impl GeminiBackend {
    /// Create a backend against `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: None,
        })
    }

    /// Create a backend for the public API with the default model.
    pub fn public(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_GEMINI_URL, DEFAULT_GEMINI_MODEL, api_key)
    }

    /// Limit how long a single request may take.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn generation_config(request: &CompletionRequest) -> GenerationConfig {
        let (response_mime_type, response_schema) = match request.result_shape() {
            Some(shape) => (Some("application/json"), Some(shape.to_gemini_schema())),
            None => (None, None),
        };

        GenerationConfig {
            response_mime_type,
            response_schema,
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn id(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models/{}", self.base_url, self.model);
        self.client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_prompt.as_ref().map(|system| Content {
                role: None,
                parts: vec![Part {
                    text: system.clone(),
                }],
            }),
            generation_config: Self::generation_config(&request),
        };

        let mut http_request = self
            .client
            .post(self.generate_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(timeout) = self.timeout {
            http_request = http_request.timeout(timeout);
        }

        debug!(model = %self.model, "Sending generateContent");

        let response = http_request
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(LlmError::RateLimited { retry_after_ms: None });
            }
            return Err(LlmError::RequestFailed(format!("HTTP {}: {}", status, text)));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        if let Some(reason) = generated.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::ContentFiltered { reason });
        }

        let candidate = generated
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ParseError("No candidates in response".to_string()))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Stop,
        };

        let content = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        let usage = generated
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            finish_reason,
            usage,
        })
    }
}
