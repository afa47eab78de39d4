//! Dispatch batch lifecycle integration tests

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use outreachdesk::config::DispatchConfig;
use outreachdesk::dispatch::BatchStatus;
use outreachdesk::errors::OutreachError;
use outreachdesk::services::{DispatchService, StatsService};
use outreachdesk::storage::{MemoryStorage, Repository, SurveySubmission};

async fn setup(ids: &[&str]) -> (Arc<dyn Repository>, DispatchService) {
    let repository: Arc<dyn Repository> = Arc::new(MemoryStorage::new());
    for id in ids {
        repository
            .insert_submission(SurveySubmission {
                id: id.to_string(),
                ..SurveySubmission::sample()
            })
            .await
            .unwrap();
    }
    let service = DispatchService::new(repository.clone(), DispatchConfig::default());
    (repository, service)
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_generate_creates_ready_batch() {
    let (repository, service) = setup(&["s1", "s2"]).await;
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    let generated = service
        .generate_at(&ids(&["s1", "missing", "s2"]), now)
        .await
        .unwrap();

    assert_eq!(generated.submission_count, 2);
    assert!(!generated.bytes.is_empty());
    assert_eq!(generated.batch.status, BatchStatus::Ready);
    assert_eq!(generated.batch.submission_ids, ids(&["s1", "s2"]));
    assert_eq!(
        generated.batch.file_name,
        format!("dispatch_{}_2024-01-15.xlsx", generated.batch.id)
    );

    let stored = repository
        .get_batch(&generated.batch.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, generated.batch);
}

#[tokio::test]
async fn test_empty_and_unknown_lists() {
    let (_, service) = setup(&["s1"]).await;

    assert!(matches!(
        service.generate(&[]).await,
        Err(OutreachError::Validation(_))
    ));
    assert!(matches!(
        service.generate(&ids(&["nope"])).await,
        Err(OutreachError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_forward_transitions_stamp_timestamps() {
    let (_, service) = setup(&["s1"]).await;
    let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let batch = service.generate_at(&ids(&["s1"]), t0).await.unwrap().batch;

    let t1 = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let downloaded = service
        .update_status_at(&batch.id, "downloaded", t1)
        .await
        .unwrap();
    assert_eq!(downloaded.status, BatchStatus::Downloaded);
    assert_eq!(downloaded.updated_at, Some(t1));
    assert_eq!(downloaded.processed_at, None);

    let t2 = Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap();
    let done = service.update_status_at(&batch.id, "done", t2).await.unwrap();
    assert_eq!(done.status, BatchStatus::Done);
    assert_eq!(done.processed_at, Some(t2));
    assert_eq!(service.get_batch(&batch.id).await.unwrap(), done);
}

#[tokio::test]
async fn test_bogus_status_leaves_batch_unchanged() {
    let (_, service) = setup(&["s1"]).await;
    let batch = service.generate(&ids(&["s1"])).await.unwrap().batch;

    for bad in ["bogus", "DONE", ""] {
        assert!(matches!(
            service.update_status(&batch.id, bad).await,
            Err(OutreachError::Validation(_))
        ));
    }
    assert_eq!(service.get_batch(&batch.id).await.unwrap(), batch);
}

#[tokio::test]
async fn test_backward_transition_rejected() {
    let (_, service) = setup(&["s1"]).await;
    let batch = service.generate(&ids(&["s1"])).await.unwrap().batch;
    let done = service.update_status(&batch.id, "done").await.unwrap();

    assert!(matches!(
        service.update_status(&batch.id, "ready").await,
        Err(OutreachError::InvalidTransition(_))
    ));
    assert_eq!(service.get_batch(&batch.id).await.unwrap(), done);

    assert!(matches!(
        service.update_status("no-such-batch", "done").await,
        Err(OutreachError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_render_sheet_matches_generated_file() {
    let (_, service) = setup(&["s1"]).await;
    let generated = service.generate(&ids(&["s1"])).await.unwrap();

    let (batch, bytes) = service.render_sheet(&generated.batch.id).await.unwrap();
    assert_eq!(batch.id, generated.batch.id);
    let original = outreachdesk::dispatch::read_rows(&generated.bytes).unwrap();
    let rebuilt = outreachdesk::dispatch::read_rows(&bytes).unwrap();
    assert_eq!(original, rebuilt);
}

#[tokio::test]
async fn test_stats_count_pending_batches() {
    let (repository, service) = setup(&["s1", "s2"]).await;
    let first = service.generate(&ids(&["s1"])).await.unwrap().batch;
    service.generate(&ids(&["s2"])).await.unwrap();
    service.update_status(&first.id, "done").await.unwrap();

    let stats = StatsService::new(repository).stats().await.unwrap();
    assert_eq!(stats.total_batches, 2);
    assert_eq!(stats.pending_dispatches, 1);
}

#[tokio::test]
async fn test_list_batches_newest_first_and_limited() {
    let repository: Arc<dyn Repository> = Arc::new(MemoryStorage::new());
    repository
        .insert_submission(SurveySubmission {
            id: "s1".to_string(),
            ..SurveySubmission::sample()
        })
        .await
        .unwrap();
    let service = DispatchService::new(
        repository,
        DispatchConfig {
            batch_list_limit: 2,
            ..DispatchConfig::default()
        },
    );

    let mut created = Vec::new();
    for hour in 1..=3 {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, hour, 0, 0).unwrap();
        created.push(service.generate_at(&ids(&["s1"]), at).await.unwrap().batch);
    }

    let listed = service.list_batches().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, created[2].id);
    assert_eq!(listed[1].id, created[1].id);
}
