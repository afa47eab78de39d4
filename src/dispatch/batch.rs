//! Dispatch batch status machine
//!
//! `ready → downloaded → done`, forward only. Skipping `downloaded` is
//! allowed, re-applying the current status is a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::{OutreachError, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BatchStatus {
    Ready,
    Downloaded,
    Done,
}

impl BatchStatus {
    /// Exact, lowercase status names only.
    pub fn parse(raw: &str) -> Result<Self> {
        raw.parse::<BatchStatus>().map_err(|_| {
            OutreachError::validation(format!(
                "Invalid status: '{}'. Valid: ready, downloaded, done",
                raw
            ))
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Done)
    }

    /// Counted as pending on the dashboard.
    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchBatch {
    pub id: String,
    pub submission_ids: Vec<String>,
    pub file_name: String,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl DispatchBatch {
    pub fn new(
        id: impl Into<String>,
        submission_ids: Vec<String>,
        file_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            submission_ids,
            file_name: file_name.into(),
            status: BatchStatus::Ready,
            created_at: now,
            updated_at: None,
            processed_at: None,
        }
    }

    /// Moves the batch to `next`.
    ///
    /// Returns `Ok(false)` when `next` is already the current status. A
    /// backward move is `InvalidTransition` and leaves the batch untouched.
    pub fn transition(&mut self, next: BatchStatus, now: DateTime<Utc>) -> Result<bool> {
        if next == self.status {
            return Ok(false);
        }
        if next < self.status {
            return Err(OutreachError::invalid_transition(format!(
                "batch {} cannot move from {} back to {}",
                self.id, self.status, next
            )));
        }

        self.status = next;
        self.updated_at = Some(now);
        if next.is_terminal() {
            self.processed_at = Some(now);
        }
        Ok(true)
    }
}
