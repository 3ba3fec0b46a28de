//! AI judge port
//!
//! The external structured-generation service consulted for moderation,
//! sentiment, and highlight selection. Treated as a blocking RPC with no SLA:
//! callers wrap every invocation in their own timeout and decide whether a
//! failure resolves to a local fallback or a retryable error.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::JudgeError;

#[async_trait]
pub trait AiJudge: Send + Sync {
    /// Ask the judge for an object conforming to `schema` (a JSON schema).
    ///
    /// A returned `Ok` value is not guaranteed to match the schema; callers
    /// validate by deserializing into the expected type.
    async fn generate_object(&self, prompt: &str, schema: Value) -> Result<Value, JudgeError>;

    /// Ask the judge for free text, bounded by `max_tokens`.
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> Result<String, JudgeError>;
}
