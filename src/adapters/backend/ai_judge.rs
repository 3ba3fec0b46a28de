//! AI judge backed by the hosted AI API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::AiJudge;
use crate::error::JudgeError;

use super::client::BackendClient;

/// Implementation of `AiJudge` over the hosted backend's AI endpoints
pub struct BackendAiJudge {
    client: Arc<BackendClient>,
}

impl BackendAiJudge {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AiJudge for BackendAiJudge {
    async fn generate_object(&self, prompt: &str, schema: Value) -> Result<Value, JudgeError> {
        self.client
            .generate_object(prompt, &schema)
            .await
            .map_err(JudgeError::from)
    }

    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> Result<String, JudgeError> {
        self.client
            .generate_text(prompt, max_tokens)
            .await
            .map_err(JudgeError::from)
    }
}
