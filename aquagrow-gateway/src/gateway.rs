//! ContentGateway - structured generation for the public site.
//!
//! Each use case is a fixed prompt plus a fixed result shape. The gateway
//! calls the backend once, checks the text is JSON of the requested shape,
//! and post-processes it for display. It never retries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::traits::{CompletionRequest, FinishReason, LlmBackend, LlmError};
use crate::content::{
    self, ContactInquiry, FaqItem, GeneratedTeamMember, InquiryTriage, SuccessStory,
    SuccessStoryDraft, TeamMemberDraft,
};
use crate::image::{ImageService, DEFAULT_IMAGE_BASE_URL};
use crate::prompts;
use crate::shape::ResultShape;

/// Error types for the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The backend call failed
    #[error("Content generation failed: {source}")]
    GenerationFailed {
        #[source]
        source: LlmError,
    },

    /// The text returned does not start like JSON
    #[error("Received non-JSON response from AI model: {preview:?}")]
    NonJson { preview: String },

    /// The text looked like JSON but did not parse
    #[error("AI model returned malformed JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The parsed value does not fit the requested shape
    #[error("Generated content does not match the expected shape at {path}: {reason}")]
    ShapeMismatch { path: String, reason: String },

    /// The backend stopped at its output token limit
    #[error("Generated content was truncated at the output token limit ({max_tokens:?})")]
    Truncated { max_tokens: Option<u32> },

    /// A contact inquiry is missing required fields
    #[error("Invalid inquiry: missing {0}")]
    InvalidInquiry(String),
}

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Company named in prompts
    #[serde(default = "default_company_name")]
    pub company_name: String,

    #[serde(default = "default_team_member_count")]
    pub team_member_count: usize,

    #[serde(default = "default_success_story_count")]
    pub success_story_count: usize,

    #[serde(default = "default_faq_count")]
    pub faq_count: usize,

    /// Seeded image service for generated people
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_company_name() -> String {
    "AquaGrow Innovations".to_string()
}

fn default_team_member_count() -> usize {
    4
}

fn default_success_story_count() -> usize {
    2
}

fn default_faq_count() -> usize {
    5
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            team_member_count: default_team_member_count(),
            success_story_count: default_success_story_count(),
            faq_count: default_faq_count(),
            image_base_url: default_image_base_url(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Photo dimensions for generated team members.
pub const TEAM_PHOTO_SIZE: (u32, u32) = (400, 400);

/// Photo dimensions for success stories.
pub const STORY_PHOTO_SIZE: (u32, u32) = (600, 400);

/// Broker between the site and a completion backend.
pub struct ContentGateway {
    backend: Arc<dyn LlmBackend>,
    config: GatewayConfig,
    images: ImageService,
}

impl ContentGateway {
    /// Create a gateway over `backend` with default configuration.
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self::with_config(backend, GatewayConfig::default())
    }

    pub fn with_config(backend: Arc<dyn LlmBackend>, config: GatewayConfig) -> Self {
        let images = ImageService::new(config.image_base_url.clone());
        Self {
            backend,
            config,
            images,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Backend identifier, for diagnostics.
    pub fn backend_id(&self) -> &str {
        self.backend.id()
    }

    /// Whether the backend answers its availability check.
    pub async fn backend_available(&self) -> bool {
        self.backend.is_available().await
    }

    /// Ask the backend for JSON matching `shape`.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        shape: &ResultShape,
    ) -> Result<Value, GatewayError> {
        self.generate("result", prompt, shape).await
    }

    /// Team member profiles with derived photos.
    pub async fn team_members(&self) -> Result<Vec<GeneratedTeamMember>, GatewayError> {
        let prompt = prompts::team_members(&self.config.company_name, self.config.team_member_count);
        let drafts: Vec<TeamMemberDraft> = self
            .generate_typed("team_members", &prompt, &content::team_member_shape())
            .await?;

        let (width, height) = TEAM_PHOTO_SIZE;
        Ok(drafts
            .into_iter()
            .map(|draft| GeneratedTeamMember {
                image_url: self.images.url(&draft.name, width, height),
                name: draft.name,
                role: draft.role,
                bio: draft.bio,
            })
            .collect())
    }

    /// Farmer success stories with derived photos.
    pub async fn success_stories(&self) -> Result<Vec<SuccessStory>, GatewayError> {
        let prompt =
            prompts::success_stories(&self.config.company_name, self.config.success_story_count);
        let drafts: Vec<SuccessStoryDraft> = self
            .generate_typed("success_stories", &prompt, &content::success_story_shape())
            .await?;

        let (width, height) = STORY_PHOTO_SIZE;
        Ok(drafts
            .into_iter()
            .map(|draft| SuccessStory {
                image_url: self.images.url(&draft.name, width, height),
                farmer_name: draft.name,
                location: draft.location,
                quote: draft.quote,
                story: draft.story,
            })
            .collect())
    }

    /// Frequently asked questions for prospective farmers.
    pub async fn faqs(&self) -> Result<Vec<FaqItem>, GatewayError> {
        let prompt = prompts::faqs(&self.config.company_name, self.config.faq_count);
        self.generate_typed("faqs", &prompt, &content::faq_shape())
            .await
    }

    /// Classify a contact form submission.
    pub async fn triage_inquiry(
        &self,
        inquiry: &ContactInquiry,
    ) -> Result<InquiryTriage, GatewayError> {
        let missing = inquiry.missing_fields();
        if !missing.is_empty() {
            return Err(GatewayError::InvalidInquiry(missing.join(", ")));
        }

        let prompt = prompts::inquiry_triage(&self.config.company_name, inquiry);
        let triage: InquiryTriage = self
            .generate_typed("inquiry_triage", &prompt, &content::triage_shape())
            .await?;

        info!(
            category = %triage.category,
            priority = ?triage.priority,
            "Contact inquiry triaged"
        );
        Ok(triage)
    }

    async fn generate_typed<T: DeserializeOwned>(
        &self,
        name: &str,
        prompt: &str,
        shape: &ResultShape,
    ) -> Result<T, GatewayError> {
        let value = self.generate(name, prompt, shape).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::ShapeMismatch {
            path: "$".to_string(),
            reason: e.to_string(),
        })
    }

    async fn generate(
        &self,
        name: &str,
        prompt: &str,
        shape: &ResultShape,
    ) -> Result<Value, GatewayError> {
        let mut request = CompletionRequest::user(prompt)
            .with_system(prompts::system(&self.config.company_name))
            .with_result_shape(name, shape.clone());
        if let Some(max) = self.config.max_tokens {
            request = request.with_max_tokens(max);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }

        debug!(use_case = name, backend = %self.backend.id(), "Requesting generated content");

        let completion = self.backend.complete(request).await.map_err(|source| {
            warn!(use_case = name, error = %source, "Content generation failed");
            GatewayError::GenerationFailed { source }
        })?;

        match completion.finish_reason {
            FinishReason::Stop => {}
            FinishReason::Length => {
                warn!(use_case = name, "Generated content hit the token limit");
                return Err(GatewayError::Truncated {
                    max_tokens: self.config.max_tokens,
                });
            }
            FinishReason::ContentFilter => {
                warn!(use_case = name, "Generated content was filtered");
                return Err(GatewayError::GenerationFailed {
                    source: LlmError::ContentFiltered {
                        reason: "output stopped by content filter".to_string(),
                    },
                });
            }
        }

        let value = parse_json_text(&completion.content)?;

        shape.validate(&value).map_err(|violation| {
            warn!(
                use_case = name,
                path = %violation.path,
                reason = %violation.reason,
                "Generated content rejected"
            );
            GatewayError::ShapeMismatch {
                path: violation.path,
                reason: violation.reason,
            }
        })?;

        debug!(
            use_case = name,
            tokens = completion.usage.total(),
            "Generated content accepted"
        );
        Ok(value)
    }
}

/// Trim and parse model output, which must open with `[` or `{`.
fn parse_json_text(text: &str) -> Result<Value, GatewayError> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('[') || trimmed.starts_with('{')) {
        return Err(GatewayError::NonJson {
            preview: trimmed.chars().take(80).collect(),
        });
    }
    serde_json::from_str(trimmed).map_err(GatewayError::InvalidJson)
}
