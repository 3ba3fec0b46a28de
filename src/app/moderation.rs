//! Moderation service
//!
//! Classifies a single text submission as approved/flagged/rejected. The AI
//! judge gets one bounded attempt; any failure (transport, timeout, response
//! that fails schema validation) resolves to the deterministic keyword
//! fallback, so `evaluate` always produces a verdict.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{ModerationResult, Severity, SuggestedAction};
use crate::domain::ports::AiJudge;

use super::DEFAULT_JUDGE_TIMEOUT;

/// Service for moderating submission text
pub struct ModerationService<J>
where
    J: AiJudge,
{
    judge: Arc<J>,
    judge_timeout: Duration,
}

impl<J> ModerationService<J>
where
    J: AiJudge,
{
    pub fn new(judge: Arc<J>) -> Self {
        Self {
            judge,
            judge_timeout: DEFAULT_JUDGE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, judge_timeout: Duration) -> Self {
        self.judge_timeout = judge_timeout;
        self
    }

    /// Moderate a piece of confession text. Always returns a verdict: the AI
    /// judge's on success, the keyword fallback's otherwise. No retries.
    pub async fn evaluate(&self, content: &str, category: Option<&str>) -> ModerationResult {
        let prompt = moderation_prompt(content, category);
        let schema =
            serde_json::to_value(schemars::schema_for!(ModerationResult)).unwrap_or_default();

        let response = tokio::time::timeout(
            self.judge_timeout,
            self.judge.generate_object(&prompt, schema),
        )
        .await;

        match response {
            Ok(Ok(value)) => match serde_json::from_value::<ModerationResult>(value) {
                Ok(verdict) => verdict,
                Err(err) => {
                    tracing::warn!(error = %err, "judge returned a malformed moderation verdict, using keyword fallback");
                    keyword_fallback(content)
                }
            },
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "AI moderation failed, using keyword fallback");
                keyword_fallback(content)
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.judge_timeout, "AI moderation timed out, using keyword fallback");
                keyword_fallback(content)
            }
        }
    }
}

fn moderation_prompt(content: &str, category: Option<&str>) -> String {
    format!(
        r#"You are an AI content moderator for an anonymous confession app. Analyze this confession for:

1. Harmful content (violence, self-harm, illegal activities)
2. Personal information that could identify someone
3. Spam or promotional content
4. Hate speech or harassment
5. Inappropriate sexual content

Content to moderate: "{content}"
Category: {category}

Consider that this is an anonymous confession app where people share personal struggles, regrets, and emotions. Be understanding of mental health discussions while flagging genuinely harmful content."#,
        content = content,
        category = category.unwrap_or("general"),
    )
}

const SELF_HARM_PHRASES: [&str; 4] = ["kill myself", "suicide", "end my life", "hurt myself"];
const VIOLENCE_PHRASES: [&str; 4] = ["bomb", "terrorist", "murder", "illegal drugs"];
const PERSONAL_INFO_PHRASES: [&str; 4] = ["phone number", "email", "address", "full name"];

/// Deterministic keyword moderation, used when the AI judge is unavailable.
///
/// Pure function of the input text: a case-insensitive literal substring scan
/// over fixed phrase groups. Every matching phrase appends its group's flag,
/// so a text can carry the same flag more than once.
pub fn keyword_fallback(content: &str) -> ModerationResult {
    let lower = content.to_lowercase();
    let groups: [(&[&str], &str); 3] = [
        (&SELF_HARM_PHRASES, "self-harm"),
        (&VIOLENCE_PHRASES, "violence"),
        (&PERSONAL_INFO_PHRASES, "personal-info"),
    ];

    let mut flags = Vec::new();
    for (phrases, flag) in groups {
        for phrase in phrases {
            if lower.contains(phrase) {
                flags.push(flag.to_string());
            }
        }
    }

    let severity = if flags.len() > 2 {
        Severity::High
    } else if !flags.is_empty() {
        Severity::Medium
    } else {
        Severity::Low
    };
    let suggested_action = if flags.len() > 2 {
        SuggestedAction::Reject
    } else if !flags.is_empty() {
        SuggestedAction::Review
    } else {
        SuggestedAction::Approve
    };
    let reason = if flags.is_empty() {
        "Content appears safe"
    } else {
        "Content flagged by basic keyword filter"
    };

    ModerationResult {
        is_approved: flags.is_empty(),
        flags,
        severity,
        reason: Some(reason.to_string()),
        suggested_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockAiJudge;

    #[test]
    fn fallback_zero_flags_approves() {
        let verdict = keyword_fallback("I secretly love pineapple on pizza");
        assert!(verdict.is_approved);
        assert!(verdict.flags.is_empty());
        assert_eq!(verdict.severity, Severity::Low);
        assert_eq!(verdict.suggested_action, SuggestedAction::Approve);
    }

    #[test]
    fn fallback_one_flag_reviews() {
        let verdict = keyword_fallback("Sometimes I want to hurt myself");
        assert!(!verdict.is_approved);
        assert_eq!(verdict.flags, vec!["self-harm"]);
        assert_eq!(verdict.severity, Severity::Medium);
        assert_eq!(verdict.suggested_action, SuggestedAction::Review);
    }

    #[test]
    fn fallback_two_flags_reviews() {
        let verdict = keyword_fallback("Reply to my email or call my phone number");
        assert_eq!(verdict.flags.len(), 2);
        assert_eq!(verdict.severity, Severity::Medium);
        assert_eq!(verdict.suggested_action, SuggestedAction::Review);
    }

    #[test]
    fn fallback_three_flags_rejects() {
        let verdict =
            keyword_fallback("thoughts of suicide, murder, and I posted my address online");
        assert_eq!(verdict.flags.len(), 3);
        assert_eq!(verdict.severity, Severity::High);
        assert_eq!(verdict.suggested_action, SuggestedAction::Reject);
        assert!(!verdict.is_approved);
    }

    #[test]
    fn fallback_is_case_insensitive() {
        let upper = keyword_fallback("I want to KILL MYSELF");
        let lower = keyword_fallback("i want to kill myself");
        assert_eq!(upper, lower);
        assert_eq!(upper.flags, vec!["self-harm"]);
    }

    #[test]
    fn fallback_allows_duplicate_flags() {
        // Two distinct self-harm phrases both append the same flag
        let verdict = keyword_fallback("I wanted to kill myself; suicide was on my mind");
        assert_eq!(verdict.flags, vec!["self-harm", "self-harm"]);
        assert_eq!(verdict.severity, Severity::Medium);
    }

    #[test]
    fn fallback_approval_tracks_flag_count() {
        for content in [
            "a quiet day",
            "my email is out there",
            "suicide and murder and my full name",
        ] {
            let verdict = keyword_fallback(content);
            assert_eq!(verdict.is_approved, verdict.flags.is_empty());
        }
    }

    #[tokio::test]
    async fn evaluate_uses_judge_verdict_on_success() {
        let judge = Arc::new(MockAiJudge::new().with_object(serde_json::json!({
            "isApproved": false,
            "flags": ["hate-speech"],
            "severity": "high",
            "reason": "targets a protected group",
            "suggestedAction": "reject"
        })));
        let service = ModerationService::new(judge.clone());

        let verdict = service.evaluate("some confession", None).await;
        assert_eq!(verdict.flags, vec!["hate-speech"]);
        assert_eq!(verdict.suggested_action, SuggestedAction::Reject);
        assert_eq!(judge.object_call_count(), 1);
    }

    #[tokio::test]
    async fn evaluate_falls_back_when_judge_fails() {
        let service = ModerationService::new(Arc::new(MockAiJudge::failing()));

        let verdict = service.evaluate("I want to kill myself", None).await;
        assert_eq!(verdict, keyword_fallback("I want to kill myself"));
    }

    #[tokio::test]
    async fn evaluate_falls_back_on_malformed_verdict() {
        let judge = Arc::new(
            MockAiJudge::new().with_object(serde_json::json!({"severity": "catastrophic"})),
        );
        let service = ModerationService::new(judge);

        let verdict = service.evaluate("a clean confession", None).await;
        assert_eq!(verdict, keyword_fallback("a clean confession"));
    }

    #[tokio::test(start_paused = true)]
    async fn evaluate_falls_back_on_timeout() {
        let service = ModerationService::new(Arc::new(MockAiJudge::hanging()))
            .with_timeout(Duration::from_secs(5));

        let verdict = service.evaluate("call my phone number", None).await;
        assert_eq!(verdict, keyword_fallback("call my phone number"));
    }

    #[tokio::test]
    async fn prompt_carries_content_and_category() {
        let judge = Arc::new(MockAiJudge::failing());
        let service = ModerationService::new(judge.clone());

        service.evaluate("my confession text", Some("regret")).await;

        let prompts = judge.object_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("my confession text"));
        assert!(prompts[0].contains("Category: regret"));
    }
}
