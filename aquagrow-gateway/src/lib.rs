//! AquaGrow Content Gateway
//!
//! Requests structured content from an external text-generation service
//! and adapts it for the public site:
//! - Trait-based completion backends (Gemini, OpenAI-compatible, mock)
//! - Result shapes rendered as response schemas and checked on return
//! - Deterministic placeholder photos for generated people
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ContentGateway               │
//! │  (prompt + shape → validated content)   │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌─────────────┐
//! │ LlmBackend  │       │ ImageService│
//! │ (Gemini/    │       │ (seeded     │
//! │  OpenAI)    │       │  photos)    │
//! └─────────────┘       └─────────────┘
//! ```

pub mod backend;
pub mod content;
pub mod gateway;
pub mod image;
mod prompts;
pub mod shape;

// Re-export main types for convenience
pub use backend::traits::{CompletionRequest, CompletionResponse, LlmBackend, LlmError};
pub use backend::{GeminiBackend, MockBackend, OpenAiBackend};
pub use content::{
    ContactInquiry, FaqItem, GeneratedTeamMember, InquiryTriage, Priority, SuccessStory,
};
pub use gateway::{ContentGateway, GatewayConfig, GatewayError};
pub use image::{derive_image_url, image_id, ImageService};
pub use shape::{FieldKind, FieldShape, ObjectShape, ResultShape, ShapeViolation};
