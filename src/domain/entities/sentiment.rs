//! Sentiment analysis value object

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overall emotional valence of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}

/// How much support/empathy the author likely needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Low,
    Medium,
    High,
}

/// Sentiment analysis of a single submission
///
/// Transient value object; the highlight selector persists only the label and
/// impact score onto the chosen submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub sentiment: SentimentLabel,
    /// 1-10, how strongly this is likely to resonate with readers
    #[schemars(range(min = 1, max = 10))]
    pub emotional_impact: i32,
    /// Main themes present, at most 3
    #[schemars(length(max = 3))]
    pub themes: Vec<String>,
    pub support_level: SupportLevel,
}

impl SentimentAnalysis {
    /// Fixed "could not analyze" sentinel returned when the judge is
    /// unavailable. Constant, not derived from the input; callers must not
    /// treat it as a real signal.
    pub fn unavailable() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            emotional_impact: 5,
            themes: vec!["general".to_string()],
            support_level: SupportLevel::Medium,
        }
    }

    /// Clamp the impact score to [1,10] and cap themes at 3
    pub fn normalized(mut self) -> Self {
        self.emotional_impact = self.emotional_impact.clamp(1, 10);
        self.themes.truncate(3);
        self
    }
}
