//! Moderation verdict value object
//!
//! The shape the AI judge must return for a moderation request. Field names
//! serialize in camelCase to match the backend AI API wire format; the derived
//! JSON schema is sent along with every request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of flagged content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// What the moderator recommends doing with the submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedAction {
    Approve,
    Review,
    Reject,
}

/// Verdict on a single text submission
///
/// Transient: only its effect (the submission's moderation status) is
/// persisted. Flags are an open vocabulary ("self-harm", "violence",
/// "personal-info", "spam", "hate-speech", "sexual-content", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResult {
    pub is_approved: bool,
    pub flags: Vec<String>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub suggested_action: SuggestedAction,
}
