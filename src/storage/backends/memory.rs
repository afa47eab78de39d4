use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;

use crate::dispatch::DispatchBatch;
use crate::errors::Result;
use crate::mapping::ProductMapping;
use crate::outreach::{EmailTemplate, Influencer};
use crate::storage::{CollectionCounts, Collections, Repository, SurveySubmission};

/// In-process collections. Locks are never held across `.await`.
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<Collections>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_collections(collections: Collections) -> Self {
        Self {
            data: RwLock::new(collections),
        }
    }

    pub fn snapshot(&self) -> Collections {
        self.data.read().clone()
    }

    /// Swaps in a whole new state (used after the file backend has persisted it).
    pub(crate) fn replace(&self, collections: Collections) {
        *self.data.write() = collections;
    }
}

#[async_trait]
impl Repository for MemoryStorage {
    async fn insert_submission(&self, submission: SurveySubmission) -> Result<()> {
        trace!("Inserting submission {}", submission.id);
        self.data.write().insert_submission(submission)
    }

    async fn get_submission(&self, id: &str) -> Result<Option<SurveySubmission>> {
        Ok(self
            .data
            .read()
            .survey_submissions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_submissions(&self) -> Result<Vec<SurveySubmission>> {
        Ok(self.data.read().survey_submissions.clone())
    }

    async fn insert_mapping(&self, mapping: ProductMapping) -> Result<()> {
        self.data.write().insert_mapping(mapping)
    }

    async fn list_mappings(&self) -> Result<Vec<ProductMapping>> {
        Ok(self.data.read().product_mappings.clone())
    }

    async fn delete_mapping(&self, id: &str) -> Result<bool> {
        Ok(self.data.write().delete_mapping(id))
    }

    async fn insert_batch(&self, batch: DispatchBatch) -> Result<()> {
        self.data.write().insert_batch(batch)
    }

    async fn get_batch(&self, id: &str) -> Result<Option<DispatchBatch>> {
        Ok(self
            .data
            .read()
            .dispatch_batches
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn update_batch(&self, batch: DispatchBatch) -> Result<()> {
        self.data.write().update_batch(batch)
    }

    async fn list_batches(&self) -> Result<Vec<DispatchBatch>> {
        Ok(self.data.read().dispatch_batches.clone())
    }

    async fn insert_influencer(&self, influencer: Influencer) -> Result<()> {
        trace!("Inserting influencer {}", influencer.id);
        self.data.write().insert_influencer(influencer)
    }

    async fn get_influencer(&self, id: &str) -> Result<Option<Influencer>> {
        Ok(self
            .data
            .read()
            .influencers
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_influencers(&self) -> Result<Vec<Influencer>> {
        Ok(self.data.read().influencers.clone())
    }

    async fn insert_template(&self, template: EmailTemplate) -> Result<()> {
        self.data.write().insert_template(template)
    }

    async fn get_template(&self, id: &str) -> Result<Option<EmailTemplate>> {
        Ok(self
            .data
            .read()
            .email_templates
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list_templates(&self) -> Result<Vec<EmailTemplate>> {
        Ok(self.data.read().email_templates.clone())
    }

    async fn counts(&self) -> Result<CollectionCounts> {
        Ok(self.data.read().counts())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
