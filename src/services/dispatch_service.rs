//! Dispatch sheet generation and batch bookkeeping

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::dispatch::{BatchStatus, DispatchBatch, DispatchSheetBuilder};
use crate::errors::{OutreachError, Result};
use crate::storage::{Repository, SurveySubmission};

/// Result of generating a dispatch sheet.
#[derive(Debug, Clone)]
pub struct GeneratedDispatch {
    pub batch: DispatchBatch,
    pub submission_count: usize,
    pub bytes: Vec<u8>,
}

/// Summary returned to API callers (the bytes are fetched separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    pub batch_id: String,
    pub file_name: String,
    pub submission_count: usize,
}

impl From<&GeneratedDispatch> for DispatchSummary {
    fn from(generated: &GeneratedDispatch) -> Self {
        Self {
            batch_id: generated.batch.id.clone(),
            file_name: generated.batch.file_name.clone(),
            submission_count: generated.submission_count,
        }
    }
}

pub struct DispatchService {
    repository: Arc<dyn Repository>,
    config: DispatchConfig,
}

impl DispatchService {
    pub fn new(repository: Arc<dyn Repository>, config: DispatchConfig) -> Self {
        Self { repository, config }
    }

    pub fn file_name(batch_id: &str, now: DateTime<Utc>) -> String {
        format!("dispatch_{}_{}.xlsx", batch_id, now.format("%Y-%m-%d"))
    }

    pub async fn generate(&self, submission_ids: &[String]) -> Result<GeneratedDispatch> {
        self.generate_at(submission_ids, Utc::now()).await
    }

    /// Builds the sheet for the known ids (unknown ids are skipped) and
    /// records a `ready` batch.
    pub async fn generate_at(
        &self,
        submission_ids: &[String],
        now: DateTime<Utc>,
    ) -> Result<GeneratedDispatch> {
        if submission_ids.is_empty() {
            return Err(OutreachError::validation("submissionIds must not be empty"));
        }

        let submissions = self.load_submissions(submission_ids).await?;
        if submissions.is_empty() {
            return Err(OutreachError::not_found(
                "None of the requested submissions exist",
            ));
        }

        let bytes = self.render(&submissions, now).await?;

        let batch_id = uuid::Uuid::new_v4().to_string();
        let batch = DispatchBatch::new(
            batch_id.clone(),
            submissions.iter().map(|s| s.id.clone()).collect(),
            Self::file_name(&batch_id, now),
            now,
        );
        self.repository.insert_batch(batch.clone()).await?;

        info!(
            "Created dispatch batch {} with {} submissions ({} bytes)",
            batch.id,
            submissions.len(),
            bytes.len()
        );
        Ok(GeneratedDispatch {
            batch,
            submission_count: submissions.len(),
            bytes,
        })
    }

    /// Rebuilds the batch's file as of its creation time.
    pub async fn render_sheet(&self, batch_id: &str) -> Result<(DispatchBatch, Vec<u8>)> {
        let batch = self.get_batch(batch_id).await?;
        let submissions = self.load_submissions(&batch.submission_ids).await?;
        if submissions.is_empty() {
            return Err(OutreachError::not_found(format!(
                "Submissions of batch {} no longer exist",
                batch_id
            )));
        }
        let bytes = self.render(&submissions, batch.created_at).await?;
        Ok((batch, bytes))
    }

    pub async fn update_status(&self, batch_id: &str, status: &str) -> Result<DispatchBatch> {
        self.update_status_at(batch_id, status, Utc::now()).await
    }

    /// Applies a status change; nothing is written when it fails.
    pub async fn update_status_at(
        &self,
        batch_id: &str,
        status: &str,
        now: DateTime<Utc>,
    ) -> Result<DispatchBatch> {
        let next = BatchStatus::parse(status)?;
        let mut batch = self.get_batch(batch_id).await?;

        let previous = batch.status;
        if batch.transition(next, now)? {
            self.repository.update_batch(batch.clone()).await?;
            info!("Batch {} status: {} → {}", batch.id, previous, next);
        }
        Ok(batch)
    }

    /// Newest first, capped at `batch_list_limit`.
    pub async fn list_batches(&self) -> Result<Vec<DispatchBatch>> {
        let mut batches = self.repository.list_batches().await?;
        batches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        batches.truncate(self.config.batch_list_limit);
        Ok(batches)
    }

    pub async fn get_batch(&self, batch_id: &str) -> Result<DispatchBatch> {
        self.repository
            .get_batch(batch_id)
            .await?
            .ok_or_else(|| OutreachError::not_found(format!("Batch not found: {}", batch_id)))
    }

    async fn load_submissions(&self, ids: &[String]) -> Result<Vec<SurveySubmission>> {
        let mut submissions = Vec::with_capacity(ids.len());
        for id in ids {
            match self.repository.get_submission(id).await? {
                Some(s) => submissions.push(s),
                None => warn!("Submission {} not found, skipped", id),
            }
        }
        Ok(submissions)
    }

    async fn render(&self, submissions: &[SurveySubmission], now: DateTime<Utc>) -> Result<Vec<u8>> {
        let mappings = self.repository.list_mappings().await?;
        DispatchSheetBuilder::new(&mappings)
            .order_prefix(self.config.order_prefix.clone())
            .sheet_name(self.config.sheet_name.clone())
            .at(now.naive_utc())
            .build(submissions)?
            .to_xlsx()
    }
}
