//! 文档存储
//!
//! The document store is an external collaborator; `Repository` is the
//! narrow collection API the services need. Writes either apply fully or
//! not at all. Two backends:
//! - `memory`: process-local, lost on restart
//! - `file`: the same collections, snapshotted to a JSON file after each write

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StorageConfig;
use crate::dispatch::DispatchBatch;
use crate::errors::{OutreachError, Result};
use crate::mapping::ProductMapping;
use crate::outreach::{EmailTemplate, Influencer};

pub mod backends;
pub mod models;

pub use backends::{FileStorage, MemoryStorage};
pub use models::{CollectionCounts, Collections, SurveySubmission};

#[async_trait]
pub trait Repository: Send + Sync {
    /// Collections are returned in insertion order.
    async fn insert_submission(&self, submission: SurveySubmission) -> Result<()>;
    async fn get_submission(&self, id: &str) -> Result<Option<SurveySubmission>>;
    async fn list_submissions(&self) -> Result<Vec<SurveySubmission>>;

    async fn insert_mapping(&self, mapping: ProductMapping) -> Result<()>;
    async fn list_mappings(&self) -> Result<Vec<ProductMapping>>;
    /// `false` when no mapping had that id.
    async fn delete_mapping(&self, id: &str) -> Result<bool>;

    async fn insert_batch(&self, batch: DispatchBatch) -> Result<()>;
    async fn get_batch(&self, id: &str) -> Result<Option<DispatchBatch>>;
    /// Replaces the stored batch with the same id; `NotFound` if absent.
    async fn update_batch(&self, batch: DispatchBatch) -> Result<()>;
    async fn list_batches(&self) -> Result<Vec<DispatchBatch>>;

    /// `Conflict` when another influencer already has the same email.
    async fn insert_influencer(&self, influencer: Influencer) -> Result<()>;
    async fn get_influencer(&self, id: &str) -> Result<Option<Influencer>>;
    async fn list_influencers(&self) -> Result<Vec<Influencer>>;

    async fn insert_template(&self, template: EmailTemplate) -> Result<()>;
    async fn get_template(&self, id: &str) -> Result<Option<EmailTemplate>>;
    async fn list_templates(&self) -> Result<Vec<EmailTemplate>>;

    async fn counts(&self) -> Result<CollectionCounts>;
    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn Repository>> {
        let storage: Arc<dyn Repository> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryStorage::new()),
            "file" => Arc::new(FileStorage::open(&config.file_path).await?),
            other => {
                return Err(OutreachError::config(format!(
                    "Unknown storage backend: '{}'. Valid: memory, file",
                    other
                )));
            }
        };
        info!("Using storage backend: {}", storage.backend_name());
        Ok(storage)
    }
}
