//! AnonMask core engine
//!
//! Content moderation and daily-highlight selection for an anonymous
//! confession service, independent of any UI. Uses hexagonal (ports &
//! adapters) architecture: application services are generic over the
//! repository and AI judge ports, with a reqwest adapter for the hosted
//! backend and in-memory doubles for tests.
//!
//! The services:
//! - [`app::ModerationService`] gates submission text, with a deterministic
//!   keyword fallback when the AI judge is unavailable
//! - [`app::SentimentService`] scores emotional content, with a constant
//!   "could not analyze" sentinel on failure
//! - [`app::HighlightService`] selects at most one confession of the day per
//!   window, idempotently and race-safely
//! - [`app::ReplyService`] generates short supportive replies
//! - [`app::SubmissionService`] handles intake, the feed, search, and
//!   reactions

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(test)]
pub mod test_utils;


pub use config::Config;
pub use error::{AppError, BackendError, DomainError, JudgeError};
