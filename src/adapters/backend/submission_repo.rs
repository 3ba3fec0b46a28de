//! Submission repository backed by the hosted record store

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{
    HighlightWindow, ModerationStatus, NewSubmission, SentimentLabel, Submission, SubmissionId,
};
use crate::domain::ports::SubmissionRepository;
use crate::error::DomainError;

use super::client::BackendClient;

const SUBMISSIONS: &str = "submissions";

/// Record shape stored in the `submissions` collection
#[derive(Serialize, Deserialize)]
struct SubmissionRecord {
    id: Uuid,
    author_id: String,
    content: String,
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    anonymous_name: String,
    anonymous_avatar: String,
    status: String,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    sentiment_score: Option<i32>,
    #[serde(default)]
    is_daily_highlight: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRecord> for Submission {
    type Error = DomainError;

    fn try_from(record: SubmissionRecord) -> Result<Self, DomainError> {
        let status = ModerationStatus::from_str(&record.status)
            .map_err(DomainError::Store)?;
        let sentiment = record
            .sentiment
            .as_deref()
            .map(SentimentLabel::from_str)
            .transpose()
            .map_err(DomainError::Store)?;

        Ok(Submission {
            id: SubmissionId(record.id),
            author_id: record.author_id,
            content: record.content,
            category: record.category,
            tags: record.tags,
            anonymous_name: record.anonymous_name,
            anonymous_avatar: record.anonymous_avatar,
            status,
            sentiment,
            sentiment_score: record.sentiment_score,
            is_daily_highlight: record.is_daily_highlight,
            created_at: record.created_at,
        })
    }
}

impl From<&Submission> for SubmissionRecord {
    fn from(submission: &Submission) -> Self {
        SubmissionRecord {
            id: submission.id.0,
            author_id: submission.author_id.clone(),
            content: submission.content.clone(),
            category: submission.category.clone(),
            tags: submission.tags.clone(),
            anonymous_name: submission.anonymous_name.clone(),
            anonymous_avatar: submission.anonymous_avatar.clone(),
            status: submission.status.to_string(),
            sentiment: submission.sentiment.map(|s| s.to_string()),
            sentiment_score: submission.sentiment_score,
            is_daily_highlight: submission.is_daily_highlight,
            created_at: submission.created_at,
        }
    }
}

fn parse_records(records: Vec<Value>) -> Result<Vec<Submission>, DomainError> {
    records
        .into_iter()
        .map(|value| {
            let record: SubmissionRecord = serde_json::from_value(value)
                .map_err(|e| DomainError::Store(format!("malformed submission record: {}", e)))?;
            Submission::try_from(record)
        })
        .collect()
}

fn window_filter(window: &HighlightWindow) -> Value {
    json!({
        "created_at": { "gte": window.start, "lt": window.end }
    })
}

/// Implementation of `SubmissionRepository` over the hosted record store.
///
/// The store has no transactions or conditional writes, so highlight claims
/// are serialized behind a process-local mutex and re-checked inside the
/// critical section. Hosts running several processes must route highlight
/// selection through one of them.
pub struct BackendSubmissionRepository {
    client: Arc<BackendClient>,
    claim_lock: Mutex<()>,
}

impl BackendSubmissionRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            client,
            claim_lock: Mutex::new(()),
        }
    }

    async fn query(
        &self,
        filter: Value,
        order: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Submission>, DomainError> {
        let records = self
            .client
            .list_records(SUBMISSIONS, &filter, order, limit)
            .await?;
        parse_records(records)
    }
}

#[async_trait]
impl SubmissionRepository for BackendSubmissionRepository {
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let mut found = self
            .query(json!({ "id": id.0 }), None, Some(1))
            .await?;
        Ok(found.pop())
    }

    async fn create(&self, new_submission: &NewSubmission) -> Result<Submission, DomainError> {
        let submission = Submission {
            id: SubmissionId::new(),
            author_id: new_submission.author_id.clone(),
            content: new_submission.content.clone(),
            category: new_submission.category.clone(),
            tags: new_submission.tags.clone(),
            anonymous_name: new_submission.anonymous_name.clone(),
            anonymous_avatar: new_submission.anonymous_avatar.clone(),
            status: new_submission.status,
            sentiment: None,
            sentiment_score: None,
            is_daily_highlight: false,
            created_at: Utc::now(),
        };

        let record = serde_json::to_value(SubmissionRecord::from(&submission))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        self.client.create_record(SUBMISSIONS, &record).await?;
        Ok(submission)
    }

    async fn update_status(
        &self,
        id: &SubmissionId,
        status: ModerationStatus,
    ) -> Result<(), DomainError> {
        self.client
            .update_record(
                SUBMISSIONS,
                &id.to_string(),
                &json!({ "status": status.to_string() }),
            )
            .await?;
        Ok(())
    }

    async fn list_approved(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let mut filter = json!({ "status": "approved" });
        if let Some(category) = category {
            filter["category"] = json!(category);
        }
        self.query(filter, Some("-created_at"), Some(limit)).await
    }

    async fn search_text(&self, query: &str, limit: i64) -> Result<Vec<Submission>, DomainError> {
        let filter = json!({
            "or": [
                { "content": { "contains": query } },
                { "tags": { "contains": query } }
            ]
        });
        self.query(filter, Some("-created_at"), Some(limit)).await
    }

    async fn find_by_category(
        &self,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        self.query(
            json!({ "status": "approved", "category": category }),
            Some("-created_at"),
            Some(limit),
        )
        .await
    }

    async fn count_by_author_since(
        &self,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        // The store exposes no count endpoint; fetch matching records and
        // count in memory
        let found = self
            .query(
                json!({ "author_id": author_id, "created_at": { "gte": since } }),
                None,
                None,
            )
            .await?;
        Ok(found.len() as i64)
    }

    async fn candidates_for_highlight(
        &self,
        window: &HighlightWindow,
        limit: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let mut filter = window_filter(window);
        filter["status"] = json!("approved");
        filter["is_daily_highlight"] = json!(false);
        self.query(filter, Some("-created_at"), Some(limit)).await
    }

    async fn find_highlight(
        &self,
        window: &HighlightWindow,
    ) -> Result<Option<Submission>, DomainError> {
        let mut filter = window_filter(window);
        filter["is_daily_highlight"] = json!(true);
        let mut found = self.query(filter, Some("-created_at"), Some(1)).await?;
        Ok(found.pop())
    }

    async fn claim_highlight(
        &self,
        id: &SubmissionId,
        window: &HighlightWindow,
        sentiment: SentimentLabel,
        impact: i32,
    ) -> Result<bool, DomainError> {
        let _guard = self.claim_lock.lock().await;

        if self.find_highlight(window).await?.is_some() {
            return Ok(false);
        }

        self.client
            .update_record(
                SUBMISSIONS,
                &id.to_string(),
                &json!({
                    "is_daily_highlight": true,
                    "sentiment": sentiment.to_string(),
                    "sentiment_score": impact,
                }),
            )
            .await?;
        Ok(true)
    }

    async fn clear_highlight(&self, id: &SubmissionId) -> Result<(), DomainError> {
        self.client
            .update_record(
                SUBMISSIONS,
                &id.to_string(),
                &json!({ "is_daily_highlight": false }),
            )
            .await?;
        Ok(())
    }
}
