//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the AI judge.

pub mod highlight;
pub mod moderation;
pub mod reply;
pub mod sentiment;
pub mod submission;

pub use highlight::{HighlightOutcome, HighlightService};
pub use moderation::{keyword_fallback, ModerationService};
pub use reply::{ReplyService, FALLBACK_REPLY};
pub use sentiment::SentimentService;
pub use submission::{
    FeedItem, ReactionToggle, SubmissionOutcome, SubmissionService, SubmitRequest,
};

/// Default upper bound on a single AI judge call
pub(crate) const DEFAULT_JUDGE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
