//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (hosted record store, in-memory
//! test doubles).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    HighlightWindow, ModerationStatus, NewReaction, NewSubmission, Reaction, ReactionId,
    SentimentLabel, Submission, SubmissionId,
};
use crate::error::DomainError;

/// Repository for Submission entities
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Find a submission by ID
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError>;

    /// Create a new submission
    async fn create(&self, submission: &NewSubmission) -> Result<Submission, DomainError>;

    /// Update moderation status
    async fn update_status(
        &self,
        id: &SubmissionId,
        status: ModerationStatus,
    ) -> Result<(), DomainError>;

    /// List approved submissions, newest first, optionally filtered by category
    async fn list_approved(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError>;

    /// Find submissions whose content or tags match `query` (case-insensitive)
    async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Submission>, DomainError>;

    /// Find approved submissions with an exact category match
    async fn find_by_category(
        &self,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError>;

    /// Count submissions by an author created at or after `since`
    async fn count_by_author_since(
        &self,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError>;

    /// Approved, not-yet-highlighted submissions created within the window,
    /// newest first
    async fn candidates_for_highlight(
        &self,
        window: &HighlightWindow,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError>;

    /// The submission flagged as highlight within the window, if any
    async fn find_highlight(
        &self,
        window: &HighlightWindow,
    ) -> Result<Option<Submission>, DomainError>;

    /// Compare-and-set: flag `id` as the window's highlight and stamp its
    /// sentiment fields, but only if no submission in the window currently
    /// carries the flag. Returns false when a highlight already exists.
    ///
    /// Implementations must not let two claims for the same window both
    /// return true, even under concurrent callers.
    async fn claim_highlight(
        &self,
        id: &SubmissionId,
        window: &HighlightWindow,
        sentiment: SentimentLabel,
        impact: i32,
    ) -> Result<bool, DomainError>;

    /// Remove the highlight flag from a submission
    async fn clear_highlight(&self, id: &SubmissionId) -> Result<(), DomainError>;
}

/// Repository for Reaction entities
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// All reactions on a submission
    async fn list_by_submission(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Reaction>, DomainError>;

    /// Reactions by one author on a submission
    async fn find_by_author(
        &self,
        submission_id: &SubmissionId,
        author_id: &str,
    ) -> Result<Vec<Reaction>, DomainError>;

    /// Create a new reaction
    async fn create(&self, reaction: &NewReaction) -> Result<Reaction, DomainError>;

    /// Delete a reaction
    async fn delete(&self, id: &ReactionId) -> Result<(), DomainError>;
}
