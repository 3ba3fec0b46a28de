//! Daily highlight service
//!
//! Selects at most one "confession of the day" per window. Reading the
//! current highlight and ensuring one is selected are separate operations;
//! reads never trigger selection. Selection is idempotent per window: once a
//! submission carries the flag, repeated calls return it without consulting
//! the judge again, and a new window starts fresh with no persisted
//! transition.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{HighlightVerdict, HighlightWindow, Submission};
use crate::domain::ports::{AiJudge, SubmissionRepository};
use crate::error::{AppError, DomainError, JudgeError};

use super::DEFAULT_JUDGE_TIMEOUT;

const DEFAULT_POOL_LIMIT: i64 = 20;

/// Result of an `ensure_selected` call
#[derive(Debug, Clone)]
pub enum HighlightOutcome {
    /// This call selected and flagged the submission
    Selected(Submission),
    /// A highlight already existed for the window (or a concurrent selection
    /// won the race); no judge request was wasted on re-selection
    AlreadySelected(Submission),
    /// The candidate pool was empty; nothing was selected and the caller may
    /// retry later
    NoCandidates,
}

impl HighlightOutcome {
    /// The highlighted submission, if one exists
    pub fn submission(&self) -> Option<&Submission> {
        match self {
            HighlightOutcome::Selected(s) | HighlightOutcome::AlreadySelected(s) => Some(s),
            HighlightOutcome::NoCandidates => None,
        }
    }
}

/// Service for selecting and reading the daily highlight
pub struct HighlightService<S, J>
where
    S: SubmissionRepository,
    J: AiJudge,
{
    submissions: Arc<S>,
    judge: Arc<J>,
    judge_timeout: Duration,
    pool_limit: i64,
}

impl<S, J> HighlightService<S, J>
where
    S: SubmissionRepository,
    J: AiJudge,
{
    pub fn new(submissions: Arc<S>, judge: Arc<J>) -> Self {
        Self {
            submissions,
            judge,
            judge_timeout: DEFAULT_JUDGE_TIMEOUT,
            pool_limit: DEFAULT_POOL_LIMIT,
        }
    }

    pub fn with_timeout(mut self, judge_timeout: Duration) -> Self {
        self.judge_timeout = judge_timeout;
        self
    }

    pub fn with_pool_limit(mut self, pool_limit: i64) -> Self {
        self.pool_limit = pool_limit;
        self
    }

    /// The current highlight for the window, if any. Read-only: never
    /// triggers selection.
    pub async fn current(&self, window: &HighlightWindow) -> Result<Option<Submission>, AppError> {
        Ok(self.submissions.find_highlight(window).await?)
    }

    /// Ensure a highlight is selected for the window.
    ///
    /// Transport failures from the judge surface as retryable
    /// `AppError::Judge`; a schema-invalid verdict or an out-of-range
    /// candidate index is an `AppError::Protocol` and flags nothing. A lost
    /// race against a concurrent selection resolves to the winner's
    /// submission.
    pub async fn ensure_selected(
        &self,
        window: &HighlightWindow,
    ) -> Result<HighlightOutcome, AppError> {
        if let Some(existing) = self.submissions.find_highlight(window).await? {
            return Ok(HighlightOutcome::AlreadySelected(existing));
        }

        let pool = self
            .submissions
            .candidates_for_highlight(window, self.pool_limit)
            .await?;
        if pool.is_empty() {
            tracing::info!("no eligible candidates for daily highlight");
            return Ok(HighlightOutcome::NoCandidates);
        }

        let verdict = self.judge_selection(&pool).await?;
        let chosen = pool.get(verdict.selected_index).ok_or_else(|| {
            tracing::error!(
                index = verdict.selected_index,
                pool_size = pool.len(),
                "judge selected an out-of-range candidate"
            );
            AppError::Protocol(format!(
                "selected index {} out of range for a pool of {}",
                verdict.selected_index,
                pool.len()
            ))
        })?;

        let impact = verdict.emotional_impact.clamp(1, 10);
        let claimed = self
            .submissions
            .claim_highlight(&chosen.id, window, verdict.sentiment, impact)
            .await?;

        if claimed {
            tracing::info!(
                submission = %chosen.id,
                sentiment = %verdict.sentiment,
                impact,
                reasoning = %verdict.reasoning,
                "daily highlight selected"
            );
            let selected = self
                .submissions
                .find_by_id(&chosen.id)
                .await?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("Submission {} not found", chosen.id))
                })?;
            Ok(HighlightOutcome::Selected(selected))
        } else {
            // Lost the race: another selection claimed the window first.
            let winner = self.submissions.find_highlight(window).await?.ok_or_else(|| {
                DomainError::Conflict("highlight claim lost but no winner is visible".to_string())
            })?;
            tracing::info!(submission = %winner.id, "concurrent selection won the window");
            Ok(HighlightOutcome::AlreadySelected(winner))
        }
    }

    /// Explicitly un-flag the window's highlight so selection can re-run.
    /// Returns whether a highlight was cleared.
    pub async fn reset(&self, window: &HighlightWindow) -> Result<bool, AppError> {
        match self.submissions.find_highlight(window).await? {
            Some(current) => {
                self.submissions.clear_highlight(&current.id).await?;
                tracing::info!(submission = %current.id, "daily highlight reset");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn judge_selection(&self, pool: &[Submission]) -> Result<HighlightVerdict, AppError> {
        let prompt = selection_prompt(pool);
        let schema =
            serde_json::to_value(schemars::schema_for!(HighlightVerdict)).unwrap_or_default();

        let value = match tokio::time::timeout(
            self.judge_timeout,
            self.judge.generate_object(&prompt, schema),
        )
        .await
        {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => return Err(AppError::Judge(err)),
            Err(_) => return Err(AppError::Judge(JudgeError::Timeout(self.judge_timeout))),
        };

        serde_json::from_value(value)
            .map_err(|err| AppError::Protocol(format!("schema-invalid selection verdict: {err}")))
    }
}

fn selection_prompt(pool: &[Submission]) -> String {
    let mut candidates = String::new();
    for (index, submission) in pool.iter().enumerate() {
        candidates.push_str(&format!(
            "{}. \"{}\" (Category: {})\n",
            index,
            submission.content,
            submission.category.as_deref().unwrap_or("general"),
        ));
    }

    format!(
        r#"Analyze these anonymous confessions and select the most impactful one for "Confession of the Day".
Consider factors like:
- Emotional resonance and relatability
- Positive impact on community
- Authenticity and vulnerability
- Universal themes that many can connect with

Confessions (numbered by zero-based index):
{candidates}
Return the selected candidate's zero-based index, the overall sentiment, brief reasoning, and an emotional impact score (1-10)."#,
    )
}
