//! Reaction repository backed by the hosted record store

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::entities::{NewReaction, Reaction, ReactionId, ReactionKind, SubmissionId};
use crate::domain::ports::ReactionRepository;
use crate::error::DomainError;

use super::client::BackendClient;

const REACTIONS: &str = "reactions";

/// Record shape stored in the `reactions` collection
#[derive(Serialize, Deserialize)]
struct ReactionRecord {
    id: Uuid,
    submission_id: Uuid,
    author_id: String,
    kind: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReactionRecord> for Reaction {
    type Error = DomainError;

    fn try_from(record: ReactionRecord) -> Result<Self, DomainError> {
        let kind = ReactionKind::from_str(&record.kind).map_err(DomainError::Store)?;
        Ok(Reaction {
            id: ReactionId(record.id),
            submission_id: SubmissionId(record.submission_id),
            author_id: record.author_id,
            kind,
            created_at: record.created_at,
        })
    }
}

fn parse_records(records: Vec<Value>) -> Result<Vec<Reaction>, DomainError> {
    records
        .into_iter()
        .map(|value| {
            let record: ReactionRecord = serde_json::from_value(value)
                .map_err(|e| DomainError::Store(format!("malformed reaction record: {}", e)))?;
            Reaction::try_from(record)
        })
        .collect()
}

/// Implementation of `ReactionRepository` over the hosted record store
pub struct BackendReactionRepository {
    client: Arc<BackendClient>,
}

impl BackendReactionRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReactionRepository for BackendReactionRepository {
    async fn list_by_submission(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Reaction>, DomainError> {
        let records = self
            .client
            .list_records(
                REACTIONS,
                &json!({ "submission_id": submission_id.0 }),
                None,
                None,
            )
            .await?;
        parse_records(records)
    }

    async fn find_by_author(
        &self,
        submission_id: &SubmissionId,
        author_id: &str,
    ) -> Result<Vec<Reaction>, DomainError> {
        let records = self
            .client
            .list_records(
                REACTIONS,
                &json!({ "submission_id": submission_id.0, "author_id": author_id }),
                None,
                None,
            )
            .await?;
        parse_records(records)
    }

    async fn create(&self, new_reaction: &NewReaction) -> Result<Reaction, DomainError> {
        let reaction = Reaction {
            id: ReactionId::new(),
            submission_id: new_reaction.submission_id,
            author_id: new_reaction.author_id.clone(),
            kind: new_reaction.kind,
            created_at: Utc::now(),
        };

        let record = ReactionRecord {
            id: reaction.id.0,
            submission_id: reaction.submission_id.0,
            author_id: reaction.author_id.clone(),
            kind: reaction.kind.to_string(),
            created_at: reaction.created_at,
        };
        let record =
            serde_json::to_value(record).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.client.create_record(REACTIONS, &record).await?;
        Ok(reaction)
    }

    async fn delete(&self, id: &ReactionId) -> Result<(), DomainError> {
        self.client
            .delete_record(REACTIONS, &id.to_string())
            .await?;
        Ok(())
    }
}
