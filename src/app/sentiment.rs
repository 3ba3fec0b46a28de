//! Sentiment service
//!
//! Scores emotional valence, impact, and themes of a submission. On any
//! judge failure the constant `SentimentAnalysis::unavailable()` sentinel is
//! returned - callers must treat it as "could not analyze", not as a signal.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::SentimentAnalysis;
use crate::domain::ports::AiJudge;

use super::DEFAULT_JUDGE_TIMEOUT;

/// Service for sentiment analysis of submission text
pub struct SentimentService<J>
where
    J: AiJudge,
{
    judge: Arc<J>,
    judge_timeout: Duration,
}

impl<J> SentimentService<J>
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

    /// Analyze the emotional content of a confession. Always returns: the
    /// judge's analysis (impact clamped to [1,10], at most 3 themes) or the
    /// fixed unavailable sentinel. No retries.
    pub async fn analyze(&self, content: &str) -> SentimentAnalysis {
        let prompt = sentiment_prompt(content);
        let schema =
            serde_json::to_value(schemars::schema_for!(SentimentAnalysis)).unwrap_or_default();

        let response = tokio::time::timeout(
            self.judge_timeout,
            self.judge.generate_object(&prompt, schema),
        )
        .await;

        match response {
            Ok(Ok(value)) => match serde_json::from_value::<SentimentAnalysis>(value) {
                Ok(analysis) => analysis.normalized(),
                Err(err) => {
                    tracing::warn!(error = %err, "judge returned a malformed sentiment analysis, using sentinel");
                    SentimentAnalysis::unavailable()
                }
            },
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "sentiment analysis failed, using sentinel");
                SentimentAnalysis::unavailable()
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.judge_timeout, "sentiment analysis timed out, using sentinel");
                SentimentAnalysis::unavailable()
            }
        }
    }
}

fn sentiment_prompt(content: &str) -> String {
    format!(
        r#"Analyze the emotional content and themes of this anonymous confession:

"{content}"

Provide analysis for:
1. Overall sentiment (positive, neutral, negative)
2. Emotional impact score (1-10, how much this might resonate with others)
3. Main themes present (max 3)
4. Support level needed (how much support/empathy this person might need)"#,
    )
}
