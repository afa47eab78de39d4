//! Influencer registry service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{OutreachError, Result};
use crate::outreach::{DEFAULT_PLATFORM, Influencer, Suppression};
use crate::storage::Repository;

/// Default page size of the influencer list.
pub const DEFAULT_INFLUENCER_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInfluencer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub blog_url: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub struct InfluencerService {
    repository: Arc<dyn Repository>,
}

impl InfluencerService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: NewInfluencer) -> Result<Influencer> {
        self.create_at(input, Utc::now()).await
    }

    /// Email and blog URL are required; a second influencer with the same
    /// email is a `Conflict`.
    pub async fn create_at(&self, input: NewInfluencer, now: DateTime<Utc>) -> Result<Influencer> {
        let email = input.email.trim();
        let blog_url = input.blog_url.trim();
        if email.is_empty() || blog_url.is_empty() {
            return Err(OutreachError::validation("Email and blog URL are required"));
        }

        let influencer = Influencer {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.map(|n| n.trim().to_string()).unwrap_or_default(),
            email: email.to_string(),
            blog_url: blog_url.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            country: input.country.map(|c| c.trim().to_string()).unwrap_or_default(),
            tags: input
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            last_contacted_at: None,
            suppression: Suppression::default(),
            created_at: now,
            updated_at: now,
        };

        self.repository.insert_influencer(influencer.clone()).await?;
        info!("Registered influencer {} ({})", influencer.id, influencer.email);
        Ok(influencer)
    }

    /// Newest first, at most `limit` (default 50) entries.
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<Influencer>> {
        let mut influencers = self.repository.list_influencers().await?;
        influencers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        influencers.truncate(limit.unwrap_or(DEFAULT_INFLUENCER_LIMIT));
        Ok(influencers)
    }

    pub async fn get(&self, id: &str) -> Result<Influencer> {
        self.repository
            .get_influencer(id)
            .await?
            .ok_or_else(|| OutreachError::not_found(format!("Influencer not found: {}", id)))
    }
}
