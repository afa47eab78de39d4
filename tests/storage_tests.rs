//! Repository backend integration tests

use std::sync::Arc;

use chrono::Utc;
use outreachdesk::config::{DispatchConfig, StorageConfig};
use outreachdesk::dispatch::{BatchStatus, DispatchBatch};
use outreachdesk::errors::OutreachError;
use outreachdesk::mapping::{MappingSimType, ProductMapping};
use outreachdesk::outreach::{Influencer, Suppression};
use outreachdesk::services::DispatchService;
use outreachdesk::storage::{
    FileStorage, MemoryStorage, Repository, StorageFactory, SurveySubmission,
};
use tempfile::TempDir;

fn mapping(id: &str) -> ProductMapping {
    ProductMapping {
        id: id.to_string(),
        country: "JP".to_string(),
        sim_type: MappingSimType::Sim,
        plan_name: "Softbank 5일".to_string(),
        days: 5,
        seller_product_code: format!("CODE-{}", id),
    }
}

async fn exercise(repository: &dyn Repository) {
    repository
        .insert_submission(SurveySubmission {
            id: "s1".to_string(),
            ..SurveySubmission::sample()
        })
        .await
        .unwrap();
    repository.insert_mapping(mapping("m1")).await.unwrap();
    repository.insert_mapping(mapping("m2")).await.unwrap();

    let mut batch = DispatchBatch::new("b1", vec!["s1".to_string()], "f.xlsx", Utc::now());
    repository.insert_batch(batch.clone()).await.unwrap();
    batch.transition(BatchStatus::Downloaded, Utc::now()).unwrap();
    repository.update_batch(batch).await.unwrap();
}

#[tokio::test]
async fn test_memory_storage_crud() {
    let storage = MemoryStorage::new();
    exercise(&storage).await;

    let mappings = storage.list_mappings().await.unwrap();
    let ids: Vec<&str> = mappings.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);

    assert!(storage.delete_mapping("m1").await.unwrap());
    assert!(!storage.delete_mapping("m1").await.unwrap());

    let counts = storage.counts().await.unwrap();
    assert_eq!(counts.submissions, 1);
    assert_eq!(counts.mappings, 1);
    assert_eq!(counts.batches, 1);

    assert!(storage.get_submission("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_ids_rejected() {
    let storage = MemoryStorage::new();
    storage.insert_mapping(mapping("m1")).await.unwrap();
    assert!(matches!(
        storage.insert_mapping(mapping("m1")).await,
        Err(OutreachError::Storage(_))
    ));
}

#[tokio::test]
async fn test_update_unknown_batch_is_not_found() {
    let storage = MemoryStorage::new();
    let batch = DispatchBatch::new("ghost", Vec::new(), "g.xlsx", Utc::now());
    assert!(matches!(
        storage.update_batch(batch).await,
        Err(OutreachError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_file_storage_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let storage = FileStorage::open(&path).await.unwrap();
        exercise(&storage).await;
    }
    assert!(path.exists());

    let reopened = FileStorage::open(&path).await.unwrap();
    let counts = reopened.counts().await.unwrap();
    assert_eq!(counts.submissions, 1);
    assert_eq!(counts.mappings, 2);
    assert_eq!(counts.batches, 1);

    let batch = reopened.get_batch("b1").await.unwrap().unwrap();
    assert_eq!(batch.status, BatchStatus::Downloaded);
    assert!(batch.updated_at.is_some());
}

#[tokio::test]
async fn test_file_storage_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        FileStorage::open(&path).await,
        Err(OutreachError::Storage(_))
    ));
}

fn influencer(id: &str, email: &str) -> Influencer {
    let now = Utc::now();
    Influencer {
        id: id.to_string(),
        name: String::new(),
        email: email.to_string(),
        blog_url: format!("https://blog.naver.com/{}", id),
        platform: "naver".to_string(),
        country: "JP".to_string(),
        tags: Vec::new(),
        last_contacted_at: None,
        suppression: Suppression::default(),
        created_at: now,
        updated_at: now,
    }
}

/// 把存储目录换成普通文件，之后的落盘必然失败
fn break_store_dir(dir: &std::path::Path) {
    std::fs::remove_dir_all(dir).unwrap();
    std::fs::write(dir, "not a directory").unwrap();
}

#[tokio::test]
async fn test_failed_status_write_leaves_batch_unchanged() {
    let dir = TempDir::new().unwrap();
    let store_dir = dir.path().join("sub");
    let storage = Arc::new(FileStorage::open(store_dir.join("store.json")).await.unwrap());
    let repository: Arc<dyn Repository> = storage.clone();

    repository
        .insert_batch(DispatchBatch::new("b1", Vec::new(), "f.xlsx", Utc::now()))
        .await
        .unwrap();
    break_store_dir(&store_dir);

    let service = DispatchService::new(repository.clone(), DispatchConfig::default());
    assert!(matches!(
        service.update_status("b1", "done").await,
        Err(OutreachError::FileOperation(_))
    ));

    let batch = repository.get_batch("b1").await.unwrap().unwrap();
    assert_eq!(batch.status, BatchStatus::Ready);
    assert!(batch.processed_at.is_none());
}

#[tokio::test]
async fn test_failed_writes_are_not_visible() {
    let dir = TempDir::new().unwrap();
    let store_dir = dir.path().join("sub");
    let storage = FileStorage::open(store_dir.join("store.json")).await.unwrap();
    storage.insert_mapping(mapping("m1")).await.unwrap();
    break_store_dir(&store_dir);

    assert!(storage.insert_mapping(mapping("m2")).await.is_err());
    assert!(storage.delete_mapping("m1").await.is_err());
    assert!(
        storage
            .insert_influencer(influencer("i1", "a@naver.com"))
            .await
            .is_err()
    );

    let ids: Vec<String> = storage
        .list_mappings()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec!["m1".to_string()]);
    assert_eq!(storage.counts().await.unwrap().influencers, 0);
}

#[tokio::test]
async fn test_file_storage_replaces_store_atomically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let storage = FileStorage::open(&path).await.unwrap();
    storage.insert_mapping(mapping("m1")).await.unwrap();
    storage.insert_mapping(mapping("m2")).await.unwrap();

    let entries: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["store.json".to_string()]);

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["productMappings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_influencer_email_is_conflict() {
    let storage = MemoryStorage::new();
    storage
        .insert_influencer(influencer("i1", "a@naver.com"))
        .await
        .unwrap();
    assert!(matches!(
        storage
            .insert_influencer(influencer("i2", "a@naver.com"))
            .await,
        Err(OutreachError::Conflict(_))
    ));
    assert_eq!(storage.list_influencers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_file_without_new_collections_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(
        &path,
        r#"{"surveySubmissions":[],"productMappings":[],"dispatchBatches":[]}"#,
    )
    .unwrap();

    let storage = FileStorage::open(&path).await.unwrap();
    let counts = storage.counts().await.unwrap();
    assert_eq!(counts.influencers, 0);
    assert_eq!(counts.templates, 0);
}

#[tokio::test]
async fn test_factory_selects_backend() {
    let dir = TempDir::new().unwrap();

    let memory = StorageFactory::create(&StorageConfig::default()).await.unwrap();
    assert_eq!(memory.backend_name(), "memory");

    let file: Arc<dyn Repository> = StorageFactory::create(&StorageConfig {
        backend: "file".to_string(),
        file_path: dir.path().join("od.json").display().to_string(),
    })
    .await
    .unwrap();
    assert_eq!(file.backend_name(), "file");

    assert!(
        StorageFactory::create(&StorageConfig {
            backend: "redis".to_string(),
            ..StorageConfig::default()
        })
        .await
        .is_err()
    );
}
