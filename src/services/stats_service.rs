use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storage::Repository;

/// 仪表盘统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Submissions created in the last 7 days.
    pub new_submissions: usize,
    /// Batches still in `ready` or `downloaded`.
    pub pending_dispatches: usize,
    pub total_batches: usize,
    pub total_mappings: usize,
}

pub struct StatsService {
    repository: Arc<dyn Repository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let since = now - Duration::days(7);
        let submissions = self.repository.list_submissions().await?;
        let batches = self.repository.list_batches().await?;
        let counts = self.repository.counts().await?;

        Ok(DashboardStats {
            new_submissions: submissions
                .iter()
                .filter(|s| s.created_at >= since)
                .count(),
            pending_dispatches: batches.iter().filter(|b| b.status.is_pending()).count(),
            total_batches: counts.batches,
            total_mappings: counts.mappings,
        })
    }
}
