//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults. Fixture
//! submissions are backdated one hour so they land inside a trailing-day
//! window created at test start.

use chrono::{Duration, Utc};

use crate::domain::entities::{ModerationStatus, Submission, SubmissionId};

/// Create an approved submission, created one hour ago
pub fn approved_submission(content: &str, category: Option<&str>) -> Submission {
    approved_submission_aged(content, category, 1)
}

/// Create an approved submission created `hours_ago` hours in the past
pub fn approved_submission_aged(
    content: &str,
    category: Option<&str>,
    hours_ago: i64,
) -> Submission {
    Submission {
        id: SubmissionId::new(),
        author_id: "test-author".to_string(),
        content: content.to_string(),
        category: category.map(String::from),
        tags: vec![],
        anonymous_name: "Secret Keeper".to_string(),
        anonymous_avatar: "🎭".to_string(),
        status: ModerationStatus::Approved,
        sentiment: None,
        sentiment_score: None,
        is_daily_highlight: false,
        created_at: Utc::now() - Duration::hours(hours_ago),
    }
}

/// Create a submission awaiting review
pub fn pending_submission(content: &str) -> Submission {
    Submission {
        status: ModerationStatus::Pending,
        ..approved_submission(content, None)
    }
}

/// Create a submission already flagged as the window's highlight
pub fn highlighted_submission(content: &str) -> Submission {
    Submission {
        is_daily_highlight: true,
        ..approved_submission(content, None)
    }
}
