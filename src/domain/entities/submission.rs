//! Submission domain entity
//!
//! An anonymous confession post. The text is immutable once created; the
//! moderation status is owned by the moderation gate, and the highlight flag
//! plus sentiment fields are owned by the daily highlight selector.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sentiment::SentimentLabel;

/// Upper bound on confession text length, in characters
pub const MAX_CONTENT_CHARS: usize = 500;

/// Category tags the client UI offers. The core treats category as a free
/// tag and does not enforce membership in this set.
pub const WELL_KNOWN_CATEGORIES: [&str; 9] = [
    "general",
    "love",
    "regret",
    "mental-health",
    "family",
    "work",
    "college",
    "fun",
    "relationships",
];

/// Unique identifier for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubmissionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting human review; not visible in the feed
    Pending,
    /// Visible in the feed
    Approved,
    /// Blocked; never visible
    Rejected,
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationStatus::Pending => write!(f, "pending"),
            ModerationStatus::Approved => write!(f, "approved"),
            ModerationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            _ => Err(format!("Unknown moderation status: {}", s)),
        }
    }
}

/// Anonymous display identity assigned to a submission at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousIdentity {
    pub name: String,
    pub avatar: String,
}

const ANONYMOUS_NAMES: [&str; 8] = [
    "Anonymous Dreamer",
    "Secret Keeper",
    "Hidden Truth",
    "Masked Soul",
    "Silent Voice",
    "Mystery Writer",
    "Faceless Friend",
    "Unknown Sage",
];

const ANONYMOUS_AVATARS: [&str; 8] = ["🎭", "👤", "🕶️", "🎪", "🎨", "🎯", "🎲", "🎸"];

impl AnonymousIdentity {
    /// Pick a random name/avatar pair from the fixed pools
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            name: ANONYMOUS_NAMES
                .choose(&mut rng)
                .copied()
                .unwrap_or("Anonymous")
                .to_string(),
            avatar: ANONYMOUS_AVATARS
                .choose(&mut rng)
                .copied()
                .unwrap_or("🎭")
                .to_string(),
        }
    }
}

/// An anonymous confession post
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    /// Opaque actor id from the authentication provider; never shown
    pub author_id: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub anonymous_name: String,
    pub anonymous_avatar: String,
    pub status: ModerationStatus,
    /// Set by the daily highlight selector, otherwise None
    pub sentiment: Option<SentimentLabel>,
    /// Emotional impact score (1-10), set alongside `sentiment`
    pub sentiment_score: Option<i32>,
    pub is_daily_highlight: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new submission
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub author_id: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub anonymous_name: String,
    pub anonymous_avatar: String,
    pub status: ModerationStatus,
}
