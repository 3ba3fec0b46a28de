//! Hosted backend API client implementation
//!
//! Record queries use a small filter dialect the store understands: a JSON
//! object of field constraints, where a constraint is either a literal (exact
//! match) or an operator object such as `{"gte": ...}`, `{"lt": ...}`,
//! `{"contains": ...}`, or `{"or": [...]}` at the top level.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use urlencoding::encode;

use crate::config::Config;
use crate::error::BackendError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(4);

/// Low-level client for the hosted backend (record store + AI API)
pub struct BackendClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(base_url: String, api_key: String, request_timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        Self::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.judge_timeout(),
        )
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| BackendError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(BackendError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(BackendError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), BackendError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 {
            Err(BackendError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(BackendError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    // ---- Record store ----

    /// List records in a collection matching `filter`
    pub async fn list_records(
        &self,
        collection: &str,
        filter: &Value,
        order: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut url = format!(
            "{}?filter={}",
            self.api_url(&format!("/records/{}", collection)),
            encode(&filter.to_string())
        );
        if let Some(order) = order {
            url.push_str(&format!("&order={}", encode(order)));
        }
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={}", limit));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let body: RecordListResponse = self.handle_response(response).await?;
        Ok(body.records)
    }

    /// Create a record in a collection
    pub async fn create_record(
        &self,
        collection: &str,
        record: &Value,
    ) -> Result<Value, BackendError> {
        let response = self
            .http
            .post(self.api_url(&format!("/records/{}", collection)))
            .bearer_auth(&self.api_key)
            .json(record)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a partial update to a record
    pub async fn update_record(
        &self,
        collection: &str,
        id: &str,
        patch: &Value,
    ) -> Result<(), BackendError> {
        let response = self
            .http
            .patch(self.api_url(&format!("/records/{}/{}", collection, id)))
            .bearer_auth(&self.api_key)
            .json(patch)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Delete a record
    pub async fn delete_record(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.api_url(&format!("/records/{}/{}", collection, id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // ---- AI API ----

    /// Ask the AI API for an object conforming to `schema`
    pub async fn generate_object(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, BackendError> {
        let response = self
            .http
            .post(self.api_url("/ai/generate-object"))
            .bearer_auth(&self.api_key)
            .json(&GenerateObjectRequest { prompt, schema })
            .send()
            .await?;

        let body: GenerateObjectResponse = self.handle_response(response).await?;
        Ok(body.object)
    }

    /// Ask the AI API for free text
    pub async fn generate_text(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        let response = self
            .http
            .post(self.api_url("/ai/generate-text"))
            .bearer_auth(&self.api_key)
            .json(&GenerateTextRequest { prompt, max_tokens })
            .send()
            .await?;

        let body: GenerateTextResponse = self.handle_response(response).await?;
        Ok(body.text)
    }
}

/// Request/response types for the backend API

#[derive(Deserialize)]
struct RecordListResponse {
    records: Vec<Value>,
}

#[derive(Serialize)]
struct GenerateObjectRequest<'a> {
    prompt: &'a str,
    schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateObjectResponse {
    object: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTextRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateTextResponse {
    text: String,
}
