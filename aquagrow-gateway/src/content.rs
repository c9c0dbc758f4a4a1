//! Typed generated content.
//!
//! Raw `*Draft` types mirror the result shapes the model fills in. The
//! public types are what the site renders, after post-processing.

use serde::{Deserialize, Serialize};

use crate::shape::{ObjectShape, ResultShape};

/// Team member profile as generated.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TeamMemberDraft {
    pub name: String,
    pub role: String,
    pub bio: String,
}

/// Team member profile ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
}

/// Success story as generated.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SuccessStoryDraft {
    pub name: String,
    pub location: String,
    pub quote: String,
    pub story: String,
}

/// Farmer success story ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    pub farmer_name: String,
    pub location: String,
    pub quote: String,
    pub story: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// A contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactInquiry {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [&'static str; 3] = ["High", "Medium", "Low"];
}

/// Structured classification of a contact inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryTriage {
    pub category: String,
    pub summary: String,
    pub priority: Priority,
}

pub(crate) fn team_member_shape() -> ResultShape {
    ResultShape::Array(
        ObjectShape::new()
            .string("name", Some("Full name of the team member."))
            .string("role", Some("Job title or role in the company."))
            .string("bio", Some("A short biography for the team member.")),
    )
}

pub(crate) fn success_story_shape() -> ResultShape {
    ResultShape::Array(
        ObjectShape::new()
            .string("name", Some("The farmer's full name."))
            .string("location", Some("The county where the farmer is located."))
            .string("quote", Some("A short, impactful quote from the farmer."))
            .string("story", Some("A brief summary of the farmer's success story.")),
    )
}

pub(crate) fn faq_shape() -> ResultShape {
    ResultShape::Array(ObjectShape::new().string("question", None).string("answer", None))
}

pub(crate) fn triage_shape() -> ResultShape {
    ResultShape::Object(
        ObjectShape::new()
            .string(
                "category",
                Some("Classify the inquiry (e.g., 'Farmer Partnership', 'Investor Relations', 'General Question')."),
            )
            .string("summary", Some("A very brief, one-sentence summary of the user's request."))
            .one_of("priority", &Priority::ALL, Some("Assign a priority level.")),
    )
}
