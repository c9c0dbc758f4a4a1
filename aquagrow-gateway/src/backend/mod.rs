//! Completion backend abstraction layer.
//!
//! Provides a trait-based interface over text-generation services:
//! - Gemini (Generative Language API)
//! - OpenAI-compatible (OpenAI, vLLM, Ollama, etc.)
//! - Mock backend for testing

pub mod gemini;
pub mod mock;
pub mod openai;
pub mod traits;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use traits::{
    CompletionRequest, CompletionResponse, FinishReason, LlmBackend, LlmError, ResponseFormat,
    Usage,
};
