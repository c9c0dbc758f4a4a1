//! Mock completion backend for testing and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Mutex;

use super::traits::*;

/// Mock backend.
///
/// Replies with scripted responses in order, then repeats the default
/// response. Can be switched to fail every call.
pub struct MockBackend {
    model_id: String,
    available: AtomicBool,
    failure: Option<String>,
    response_content: String,
    finish_reason: FinishReason,
    scripted: Mutex<VecDeque<String>>,
    last_request: Mutex<Option<CompletionRequest>>,
    call_count: AtomicU32,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            available: AtomicBool::new(true),
            failure: None,
            response_content: "[]".to_string(),
            finish_reason: FinishReason::Stop,
            scripted: Mutex::new(VecDeque::new()),
            last_request: Mutex::new(None),
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the default response content.
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.response_content = content.into();
        self
    }

    /// Report `reason` as the finish reason of every completion.
    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = reason;
        self
    }

    /// Queue responses returned before the default one.
    pub fn with_scripted(mut self, responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scripted
            .get_mut()
            .extend(responses.into_iter().map(Into::into));
        self
    }

    /// Fail every completion with `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Get the number of times complete was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request received.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().await.clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        // Estimate token counts
        let prompt_tokens = (request.prompt.len()
            + request.system_prompt.as_ref().map_or(0, String::len)) as u32
            / 4;

        *self.last_request.lock().await = Some(request);

        if !self.available.load(Ordering::SeqCst) {
            return Err(LlmError::Unavailable("Mock backend disabled".to_string()));
        }
        if let Some(message) = &self.failure {
            return Err(LlmError::RequestFailed(message.clone()));
        }

        let content = self
            .scripted
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.response_content.clone());
        let completion_tokens = content.len() as u32 / 4;

        Ok(CompletionResponse {
            content,
            finish_reason: self.finish_reason,
            usage: Usage {
                prompt_tokens,
                completion_tokens,
            },
        })
    }
}
