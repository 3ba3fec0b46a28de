//! Supportive reply service
//!
//! Generates a short empathetic response to a confession. Pure pass-through
//! to the judge's text API with a static fallback string.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::SentimentLabel;
use crate::domain::ports::AiJudge;

use super::DEFAULT_JUDGE_TIMEOUT;

/// Fixed acknowledgment used when the judge cannot produce a reply
pub const FALLBACK_REPLY: &str =
    "Thank you for sharing. Your feelings are valid, and you're not alone in this experience.";

const REPLY_MAX_TOKENS: u32 = 150;

/// Service for generating supportive replies
pub struct ReplyService<J>
where
    J: AiJudge,
{
    judge: Arc<J>,
    judge_timeout: Duration,
}

impl<J> ReplyService<J>
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

    /// Generate a brief supportive reply, trimmed of surrounding whitespace.
    /// Falls back to `FALLBACK_REPLY` on any failure. No retries.
    pub async fn generate(&self, content: &str, sentiment: SentimentLabel) -> String {
        let prompt = reply_prompt(content, sentiment);

        let response = tokio::time::timeout(
            self.judge_timeout,
            self.judge.generate_text(&prompt, REPLY_MAX_TOKENS),
        )
        .await;

        match response {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                tracing::warn!("judge returned an empty supportive reply, using fallback");
                FALLBACK_REPLY.to_string()
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "supportive reply generation failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.judge_timeout, "supportive reply generation timed out, using fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

fn reply_prompt(content: &str, sentiment: SentimentLabel) -> String {
    format!(
        r#"Generate a brief, supportive, anonymous response to this confession:

"{content}"

Sentiment: {sentiment}

Guidelines:
- Be empathetic and non-judgmental
- Keep it under 100 words
- Don't give medical advice
- Focus on validation and hope
- Use inclusive, supportive language

Generate a caring response that shows the person they're not alone."#,
    )
}
