//! Reaction domain entity
//!
//! Readers react to a visible submission with one of four kinds. An author
//! holds at most one reaction per submission; counts are tallied in memory
//! from individual reaction records (the store has no aggregation).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::submission::SubmissionId;

/// Unique identifier for a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionId(pub Uuid);

impl ReactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReactionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reaction kinds supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Heart,  // ❤️
    Cry,    // 😢
    Laugh,  // 😂
    Relate, // ✅ "I relate"
}

impl ReactionKind {
    /// Get the emoji representation
    pub fn emoji(&self) -> &'static str {
        match self {
            ReactionKind::Heart => "❤️",
            ReactionKind::Cry => "😢",
            ReactionKind::Laugh => "😂",
            ReactionKind::Relate => "✅",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Heart => write!(f, "heart"),
            ReactionKind::Cry => write!(f, "cry"),
            ReactionKind::Laugh => write!(f, "laugh"),
            ReactionKind::Relate => write!(f, "relate"),
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heart" | "❤️" | "❤" => Ok(ReactionKind::Heart),
            "cry" | "😢" => Ok(ReactionKind::Cry),
            "laugh" | "😂" => Ok(ReactionKind::Laugh),
            "relate" | "✅" => Ok(ReactionKind::Relate),
            _ => Err(format!(
                "Unknown reaction: {}. Use: heart, cry, laugh, relate",
                s
            )),
        }
    }
}

/// A single reaction on a submission
#[derive(Debug, Clone, Serialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub submission_id: SubmissionId,
    pub author_id: String,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new reaction
#[derive(Debug, Clone)]
pub struct NewReaction {
    pub submission_id: SubmissionId,
    pub author_id: String,
    pub kind: ReactionKind,
}

/// Per-kind reaction counts for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ReactionCounts {
    pub heart: i64,
    pub cry: i64,
    pub laugh: i64,
    pub relate: i64,
}

impl ReactionCounts {
    /// Tally individual reaction records into per-kind counts
    pub fn tally(reactions: &[Reaction]) -> Self {
        let mut counts = Self::default();
        for reaction in reactions {
            match reaction.kind {
                ReactionKind::Heart => counts.heart += 1,
                ReactionKind::Cry => counts.cry += 1,
                ReactionKind::Laugh => counts.laugh += 1,
                ReactionKind::Relate => counts.relate += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> i64 {
        self.heart + self.cry + self.laugh + self.relate
    }
}
