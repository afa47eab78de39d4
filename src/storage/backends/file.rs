use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::MemoryStorage;
use crate::dispatch::DispatchBatch;
use crate::errors::{OutreachError, Result};
use crate::mapping::ProductMapping;
use crate::outreach::{EmailTemplate, Influencer};
use crate::storage::{CollectionCounts, Collections, Repository, SurveySubmission};

/// JSON 快照存储：内存集合 + 每次写入后整体落盘
///
/// 写操作先在副本上执行，副本写入临时文件并 rename 覆盖后才替换内存状态；
/// 落盘失败时内存与文件都保持原样。
pub struct FileStorage {
    path: PathBuf,
    inner: MemoryStorage,
    // 串行化写操作，避免旧快照覆盖新快照
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let collections = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Collections::default(),
            Ok(content) => serde_json::from_str::<Collections>(&content).map_err(|e| {
                OutreachError::storage(format!(
                    "Failed to parse store file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file {} not found, starting empty", path.display());
                Collections::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Loaded store file {}: {} submissions, {} mappings, {} batches, {} influencers",
            path.display(),
            collections.survey_submissions.len(),
            collections.product_mappings.len(),
            collections.dispatch_batches.len(),
            collections.influencers.len()
        );

        Ok(Self {
            path,
            inner: MemoryStorage::from_collections(collections),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `store.json` → `store.json.tmp`，与目标同目录，rename 才是原子的
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Applies `op` to a copy of the collections, persists the copy, then
    /// makes it visible. Nothing changes when `op` or the write fails.
    async fn commit<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Collections) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut next = self.inner.snapshot();
        let out = op(&mut next)?;
        self.write_snapshot(&next).await?;
        self.inner.replace(next);
        Ok(out)
    }

    async fn write_snapshot(&self, collections: &Collections) -> Result<()> {
        let json = serde_json::to_string_pretty(collections)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                OutreachError::file_operation(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let tmp = self.temp_path();
        let written = match tokio::fs::write(&tmp, json).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(OutreachError::file_operation(format!(
                "Failed to write store file {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for FileStorage {
    async fn insert_submission(&self, submission: SurveySubmission) -> Result<()> {
        self.commit(|c| c.insert_submission(submission)).await
    }

    async fn get_submission(&self, id: &str) -> Result<Option<SurveySubmission>> {
        self.inner.get_submission(id).await
    }

    async fn list_submissions(&self) -> Result<Vec<SurveySubmission>> {
        self.inner.list_submissions().await
    }

    async fn insert_mapping(&self, mapping: ProductMapping) -> Result<()> {
        self.commit(|c| c.insert_mapping(mapping)).await
    }

    async fn list_mappings(&self) -> Result<Vec<ProductMapping>> {
        self.inner.list_mappings().await
    }

    async fn delete_mapping(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.inner.snapshot();
        if !next.delete_mapping(id) {
            return Ok(false);
        }
        self.write_snapshot(&next).await?;
        self.inner.replace(next);
        Ok(true)
    }

    async fn insert_batch(&self, batch: DispatchBatch) -> Result<()> {
        self.commit(|c| c.insert_batch(batch)).await
    }

    async fn get_batch(&self, id: &str) -> Result<Option<DispatchBatch>> {
        self.inner.get_batch(id).await
    }

    async fn update_batch(&self, batch: DispatchBatch) -> Result<()> {
        self.commit(|c| c.update_batch(batch)).await
    }

    async fn list_batches(&self) -> Result<Vec<DispatchBatch>> {
        self.inner.list_batches().await
    }

    async fn insert_influencer(&self, influencer: Influencer) -> Result<()> {
        self.commit(|c| c.insert_influencer(influencer)).await
    }

    async fn get_influencer(&self, id: &str) -> Result<Option<Influencer>> {
        self.inner.get_influencer(id).await
    }

    async fn list_influencers(&self) -> Result<Vec<Influencer>> {
        self.inner.list_influencers().await
    }

    async fn insert_template(&self, template: EmailTemplate) -> Result<()> {
        self.commit(|c| c.insert_template(template)).await
    }

    async fn get_template(&self, id: &str) -> Result<Option<EmailTemplate>> {
        self.inner.get_template(id).await
    }

    async fn list_templates(&self) -> Result<Vec<EmailTemplate>> {
        self.inner.list_templates().await
    }

    async fn counts(&self) -> Result<CollectionCounts> {
        self.inner.counts().await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
