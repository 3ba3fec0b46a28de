//! Mock implementations of port traits
//!
//! In-memory repositories that honor the port contracts (including the
//! claim_highlight compare-and-set) and a scripted AI judge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::domain::entities::{
    HighlightWindow, ModerationStatus, NewReaction, NewSubmission, Reaction, ReactionId,
    SentimentLabel, Submission, SubmissionId,
};
use crate::domain::ports::{AiJudge, ReactionRepository, SubmissionRepository};
use crate::error::{DomainError, JudgeError};

// ============================================================================
// In-Memory Submission Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<HashMap<SubmissionId, Submission>>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a submission for testing
    pub fn with_submission(self, submission: Submission) -> Self {
        {
            let mut submissions = self.submissions.write().unwrap();
            submissions.insert(submission.id, submission);
        }
        self
    }

    fn sorted_newest_first(mut items: Vec<Submission>) -> Vec<Submission> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions.get(id).cloned())
    }

    async fn create(&self, new_submission: &NewSubmission) -> Result<Submission, DomainError> {
        let submission = Submission {
            id: SubmissionId::new(),
            author_id: new_submission.author_id.clone(),
            content: new_submission.content.clone(),
            category: new_submission.category.clone(),
            tags: new_submission.tags.clone(),
            anonymous_name: new_submission.anonymous_name.clone(),
            anonymous_avatar: new_submission.anonymous_avatar.clone(),
            status: new_submission.status,
            sentiment: None,
            sentiment_score: None,
            is_daily_highlight: false,
            created_at: Utc::now(),
        };

        let mut submissions = self.submissions.write().unwrap();
        submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: ModerationStatus,
    ) -> Result<(), DomainError> {
        let mut submissions = self.submissions.write().unwrap();
        if let Some(submission) = submissions.get_mut(id) {
            submission.status = status;
            Ok(())
        } else {
            Err(DomainError::NotFound(format!(
                "Submission {} not found",
                id
            )))
        }
    }

    async fn list_approved(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        let matching: Vec<Submission> = submissions
            .values()
            .filter(|s| s.status == ModerationStatus::Approved)
            .filter(|s| match category {
                Some(c) => s.category.as_deref() == Some(c),
                None => true,
            })
            .cloned()
            .collect();
        let mut sorted = Self::sorted_newest_first(matching);
        sorted.truncate(limit as usize);
        Ok(sorted)
    }

    async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Submission>, DomainError> {
        let needle = query.to_lowercase();
        let submissions = self.submissions.read().unwrap();
        let matching: Vec<Submission> = submissions
            .values()
            .filter(|s| {
                s.content.to_lowercase().contains(&needle)
                    || s.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        let mut sorted = Self::sorted_newest_first(matching);
        sorted.truncate(limit as usize);
        Ok(sorted)
    }

    async fn find_by_category(
        &self,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        let matching: Vec<Submission> = submissions
            .values()
            .filter(|s| s.status == ModerationStatus::Approved)
            .filter(|s| s.category.as_deref() == Some(category))
            .cloned()
            .collect();
        let mut sorted = Self::sorted_newest_first(matching);
        sorted.truncate(limit as usize);
        Ok(sorted)
    }

    async fn count_by_author_since(
        &self,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions
            .values()
            .filter(|s| s.author_id == author_id && s.created_at >= since)
            .count() as i64)
    }

    async fn candidates_for_highlight(
        &self,
        window: &HighlightWindow,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        let matching: Vec<Submission> = submissions
            .values()
            .filter(|s| {
                s.status == ModerationStatus::Approved
                    && !s.is_daily_highlight
                    && window.contains(s.created_at)
            })
            .cloned()
            .collect();
        let mut sorted = Self::sorted_newest_first(matching);
        sorted.truncate(limit as usize);
        Ok(sorted)
    }

    async fn find_highlight(
        &self,
        window: &HighlightWindow,
    ) -> Result<Option<Submission>, DomainError> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions
            .values()
            .find(|s| s.is_daily_highlight && window.contains(s.created_at))
            .cloned())
    }

    async fn claim_highlight(
        &self,
        id: &SubmissionId,
        window: &HighlightWindow,
        sentiment: SentimentLabel,
        impact: i32,
    ) -> Result<bool, DomainError> {
        // Check and flag under one write guard so concurrent claims serialize
        let mut submissions = self.submissions.write().unwrap();

        let already_claimed = submissions
            .values()
            .any(|s| s.is_daily_highlight && window.contains(s.created_at));
        if already_claimed {
            return Ok(false);
        }

        let submission = submissions.get_mut(id).ok_or_else(|| {
            DomainError::NotFound(format!("Submission {} not found", id))
        })?;
        submission.is_daily_highlight = true;
        submission.sentiment = Some(sentiment);
        submission.sentiment_score = Some(impact);
        Ok(true)
    }

    async fn clear_highlight(&self, id: &SubmissionId) -> Result<(), DomainError> {
        let mut submissions = self.submissions.write().unwrap();
        if let Some(submission) = submissions.get_mut(id) {
            submission.is_daily_highlight = false;
            Ok(())
        } else {
            Err(DomainError::NotFound(format!(
                "Submission {} not found",
                id
            )))
        }
    }
}

// ============================================================================
// In-Memory Reaction Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReactionRepository {
    reactions: Arc<RwLock<HashMap<ReactionId, Reaction>>>,
}

impl InMemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {
    async fn list_by_submission(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Reaction>, DomainError> {
        let reactions = self.reactions.read().unwrap();
        Ok(reactions
            .values()
            .filter(|r| r.submission_id == *submission_id)
            .cloned()
            .collect())
    }

    async fn find_by_author(
        &self,
        submission_id: &SubmissionId,
        author_id: &str,
    ) -> Result<Vec<Reaction>, DomainError> {
        let reactions = self.reactions.read().unwrap();
        Ok(reactions
            .values()
            .filter(|r| r.submission_id == *submission_id && r.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new_reaction: &NewReaction) -> Result<Reaction, DomainError> {
        let reaction = Reaction {
            id: ReactionId::new(),
            submission_id: new_reaction.submission_id,
            author_id: new_reaction.author_id.clone(),
            kind: new_reaction.kind,
            created_at: Utc::now(),
        };

        let mut reactions = self.reactions.write().unwrap();
        reactions.insert(reaction.id, reaction.clone());
        Ok(reaction)
    }

    async fn delete(&self, id: &ReactionId) -> Result<(), DomainError> {
        let mut reactions = self.reactions.write().unwrap();
        if reactions.remove(id).is_some() {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Reaction {} not found", id)))
        }
    }
}

// ============================================================================
// Mock AI Judge
// ============================================================================

/// A scripted AI judge that records prompts and returns queued responses
///
/// With an empty queue every call fails, so `MockAiJudge::new()` behaves as
/// an unavailable judge unless responses are scripted with `with_object` /
/// `with_text`.
#[derive(Default)]
pub struct MockAiJudge {
    object_responses: Arc<RwLock<VecDeque<Value>>>,
    text_responses: Arc<RwLock<VecDeque<String>>>,
    should_fail: Arc<RwLock<bool>>,
    hang: bool,
    object_prompts: Arc<RwLock<Vec<String>>>,
    text_prompts: Arc<RwLock<Vec<String>>>,
}

impl MockAiJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A judge whose every call fails with `JudgeError::Unavailable`
    pub fn failing() -> Self {
        let judge = Self::default();
        *judge.should_fail.write().unwrap() = true;
        judge
    }

    /// A judge whose calls never complete (for timeout tests)
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    /// Queue a structured-generation response
    pub fn with_object(self, value: Value) -> Self {
        self.object_responses.write().unwrap().push_back(value);
        self
    }

    /// Queue a text-generation response
    pub fn with_text(self, text: &str) -> Self {
        self.text_responses
            .write()
            .unwrap()
            .push_back(text.to_string());
        self
    }

    /// Number of structured-generation calls received
    pub fn object_call_count(&self) -> usize {
        self.object_prompts.read().unwrap().len()
    }

    /// Prompts passed to `generate_object`, in call order
    pub fn object_prompts(&self) -> Vec<String> {
        self.object_prompts.read().unwrap().clone()
    }

    /// Prompts passed to `generate_text`, in call order
    pub fn text_prompts(&self) -> Vec<String> {
        self.text_prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl AiJudge for MockAiJudge {
    async fn generate_object(&self, prompt: &str, _schema: Value) -> Result<Value, JudgeError> {
        self.object_prompts.write().unwrap().push(prompt.to_string());

        if self.hang {
            std::future::pending::<()>().await;
        }
        if *self.should_fail.read().unwrap() {
            return Err(JudgeError::Unavailable("mock judge failure".to_string()));
        }

        self.object_responses
            .write()
            .unwrap()
            .pop_front()
            .ok_or_else(|| JudgeError::Unavailable("no scripted object response".to_string()))
    }

    async fn generate_text(&self, prompt: &str, _max_tokens: u32) -> Result<String, JudgeError> {
        self.text_prompts.write().unwrap().push(prompt.to_string());

        if self.hang {
            std::future::pending::<()>().await;
        }
        if *self.should_fail.read().unwrap() {
            return Err(JudgeError::Unavailable("mock judge failure".to_string()));
        }

        self.text_responses
            .write()
            .unwrap()
            .pop_front()
            .ok_or_else(|| JudgeError::Unavailable("no scripted text response".to_string()))
    }
}
