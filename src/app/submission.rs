//! Submission service
//!
//! Intake (moderation gate, daily limit, anonymous identity), the approved
//! feed, search, and reaction toggling. Cross-collection lookups (reaction
//! counts per submission) are separate list calls merged in memory - the
//! record store has no joins.

use std::sync::Arc;

use chrono::{NaiveTime, Utc};

use crate::domain::entities::{
    AnonymousIdentity, ModerationResult, ModerationStatus, NewReaction, NewSubmission, Reaction,
    ReactionCounts, ReactionKind, Submission, SubmissionId, SuggestedAction, MAX_CONTENT_CHARS,
};
use crate::domain::ports::{AiJudge, ReactionRepository, SubmissionRepository};
use crate::error::{AppError, DomainError};

use super::moderation::ModerationService;

/// A request to post a new confession
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub author_id: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// The stored submission together with the verdict that gated it
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub submission: Submission,
    pub moderation: ModerationResult,
}

/// A feed entry: submission plus merged reaction counts
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub submission: Submission,
    pub reactions: ReactionCounts,
}

/// Result of a reaction toggle
#[derive(Debug, Clone)]
pub enum ReactionToggle {
    /// The author had no reaction on the submission; one was added
    Added(Reaction),
    /// The author's previous reaction of a different kind was swapped out
    Replaced(Reaction),
    /// The author re-sent their existing kind; the reaction was removed
    Removed,
}

/// Service for submission intake, feed assembly, and reactions
pub struct SubmissionService<S, R, J>
where
    S: SubmissionRepository,
    R: ReactionRepository,
    J: AiJudge,
{
    submissions: Arc<S>,
    reactions: Arc<R>,
    moderation: ModerationService<J>,
}

impl<S, R, J> SubmissionService<S, R, J>
where
    S: SubmissionRepository,
    R: ReactionRepository,
    J: AiJudge,
{
    pub fn new(submissions: Arc<S>, reactions: Arc<R>, moderation: ModerationService<J>) -> Self {
        Self {
            submissions,
            reactions,
            moderation,
        }
    }

    /// Post a new confession through the moderation gate.
    ///
    /// The moderator's suggested action decides visibility: approve ->
    /// Approved (in the feed), review -> Pending, reject -> Rejected. An
    /// author may post once per UTC day.
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmissionOutcome, AppError> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("confession text is empty".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::Validation(format!(
                "confession text exceeds {} characters",
                MAX_CONTENT_CHARS
            )));
        }

        let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let posted_today = self
            .submissions
            .count_by_author_since(&request.author_id, day_start)
            .await?;
        if posted_today > 0 {
            return Err(AppError::Validation(
                "daily confession limit reached".to_string(),
            ));
        }

        let moderation = self
            .moderation
            .evaluate(content, request.category.as_deref())
            .await;
        let status = match moderation.suggested_action {
            SuggestedAction::Approve => ModerationStatus::Approved,
            SuggestedAction::Review => ModerationStatus::Pending,
            SuggestedAction::Reject => ModerationStatus::Rejected,
        };

        let identity = AnonymousIdentity::random();
        let submission = self
            .submissions
            .create(&NewSubmission {
                author_id: request.author_id,
                content: content.to_string(),
                category: request.category,
                tags: request.tags,
                anonymous_name: identity.name,
                anonymous_avatar: identity.avatar,
                status,
            })
            .await?;

        tracing::info!(
            submission = %submission.id,
            status = %submission.status,
            flags = moderation.flags.len(),
            "confession submitted"
        );

        Ok(SubmissionOutcome {
            submission,
            moderation,
        })
    }

    /// Approved submissions, newest first, with reaction counts merged in
    pub async fn feed(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<FeedItem>, AppError> {
        let submissions = self.submissions.list_approved(category, limit).await?;
        self.attach_reactions(submissions).await
    }

    /// Search approved submissions by content/tag text and category name,
    /// merged and deduplicated in memory. An empty query is the plain feed.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<FeedItem>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return self.feed(None, limit).await;
        }

        let mut merged = self.submissions.search_text(query, limit).await?;
        for candidate in self
            .submissions
            .find_by_category(&query.to_lowercase(), limit)
            .await?
        {
            if !merged.iter().any(|s| s.id == candidate.id) {
                merged.push(candidate);
            }
        }

        merged.retain(|s| s.status == ModerationStatus::Approved);
        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        merged.truncate(limit as usize);

        self.attach_reactions(merged).await
    }

    /// Toggle an author's reaction on a submission. At most one reaction per
    /// author per submission.
    pub async fn react(
        &self,
        author_id: &str,
        submission_id: &SubmissionId,
        kind: ReactionKind,
    ) -> Result<ReactionToggle, AppError> {
        self.submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Submission {} not found", submission_id))
            })?;

        let existing = self
            .reactions
            .find_by_author(submission_id, author_id)
            .await?;
        let had_same_kind = existing.iter().any(|r| r.kind == kind);
        let had_other_kind = existing.iter().any(|r| r.kind != kind);

        for reaction in &existing {
            self.reactions.delete(&reaction.id).await?;
        }

        if had_same_kind {
            return Ok(ReactionToggle::Removed);
        }

        let reaction = self
            .reactions
            .create(&NewReaction {
                submission_id: *submission_id,
                author_id: author_id.to_string(),
                kind,
            })
            .await?;

        Ok(if had_other_kind {
            ReactionToggle::Replaced(reaction)
        } else {
            ReactionToggle::Added(reaction)
        })
    }

    /// Resolve a submission held for review: approve it into the feed or
    /// reject it outright.
    pub async fn resolve_pending(
        &self,
        id: &SubmissionId,
        approve: bool,
    ) -> Result<Submission, AppError> {
        let submission = self.submissions.find_by_id(id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("Submission {} not found", id))
        })?;
        if submission.status != ModerationStatus::Pending {
            return Err(AppError::Validation(format!(
                "submission {} is not pending review",
                id
            )));
        }

        let status = if approve {
            ModerationStatus::Approved
        } else {
            ModerationStatus::Rejected
        };
        self.submissions.update_status(id, status).await?;
        tracing::info!(submission = %id, status = %status, "pending submission resolved");

        Ok(Submission {
            status,
            ..submission
        })
    }

    /// Reaction counts for a single submission
    pub async fn reaction_counts(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<ReactionCounts, AppError> {
        let reactions = self.reactions.list_by_submission(submission_id).await?;
        Ok(ReactionCounts::tally(&reactions))
    }

    async fn attach_reactions(
        &self,
        submissions: Vec<Submission>,
    ) -> Result<Vec<FeedItem>, AppError> {
        let mut items = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let reactions = self.reactions.list_by_submission(&submission.id).await?;
            items.push(FeedItem {
                reactions: ReactionCounts::tally(&reactions),
                submission,
            });
        }
        Ok(items)
    }
}
