//! Daily highlight types
//!
//! A highlight window is the period over which at most one submission may be
//! promoted. The window policy belongs to the caller; the selector only needs
//! its bounds.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::sentiment::SentimentLabel;

/// Half-open time window `[start, end)` for highlight selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl HighlightWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The trailing 24 hours ending at `now`
    pub fn trailing_day(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::hours(24),
            end: now,
        }
    }

    /// A UTC calendar day
    pub fn utc_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// The judge's answer to a highlight selection request
///
/// `selected_index` refers to a candidate by its zero-based position in the
/// pool the judge was shown. An out-of-range index is a protocol violation,
/// never silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighlightVerdict {
    pub selected_index: usize,
    pub sentiment: SentimentLabel,
    /// Brief explanation of why this candidate was selected
    pub reasoning: String,
    /// 1-10 emotional impact estimate
    #[schemars(range(min = 1, max = 10))]
    pub emotional_impact: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_day_spans_24_hours() {
        let now = Utc::now();
        let window = HighlightWindow::trailing_day(now);
        assert_eq!(window.end - window.start, Duration::hours(24));
        assert!(window.contains(now - Duration::hours(1)));
        assert!(!window.contains(now));
        assert!(!window.contains(now - Duration::hours(25)));
    }

    #[test]
    fn utc_day_is_half_open() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let window = HighlightWindow::utc_day(date);
        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn verdict_rejects_negative_index() {
        let result = serde_json::from_value::<HighlightVerdict>(serde_json::json!({
            "selectedIndex": -1,
            "sentiment": "negative",
            "reasoning": "most relatable",
            "emotionalImpact": 7
        }));

        assert!(result.is_err());
    }
}
