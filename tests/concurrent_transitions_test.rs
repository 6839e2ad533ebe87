// Call-site atomicity: concurrent transition requests on one application

use std::sync::Arc;
use triplink_lifecycle::{
    ApplicationEvent, ApplicationState, InMemorySubjectStore, LifecycleError, SubjectStore,
    TransitionLog, TransitionService,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_concurrent_decision_wins() {
    let service = Arc::new(TransitionService::new(Arc::new(InMemorySubjectStore::new())));
    service.open("app-1").await.unwrap();
    service.transition("app-1", "SUBMITTED", "user").await.unwrap();
    service.transition("app-1", "UNDER_REVIEW", "admin-a").await.unwrap();

    // Two admins decide at once from UNDER_REVIEW
    let mut handles = Vec::new();
    for (actor, target) in [("admin-a", "APPROVED"), ("admin-b", "REJECTED")]
        .into_iter()
        .cycle()
        .take(16)
    {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.transition("app-1", target, actor).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(LifecycleError::ConcurrentModification { .. })
            | Err(LifecycleError::InvalidTransition { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(successes, 1);

    let log = service.log_snapshot().await;
    assert_eq!(log.len(), 3);
    let final_state = service.store().current_state("app-1").await.unwrap();
    assert!(matches!(
        final_state,
        ApplicationState::Approved | ApplicationState::Rejected
    ));
    assert_eq!(log.replay("app-1").unwrap(), final_state);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn log_replay_matches_store_across_many_applications() {
    let service = Arc::new(TransitionService::new(Arc::new(InMemorySubjectStore::new())));

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let id = format!("app-{i}");
            service.open(&id).await?;
            service.apply_event(&id, ApplicationEvent::Submit, "user").await?;
            service.apply_event(&id, ApplicationEvent::BeginReview, "admin").await?;
            let decision = if i % 2 == 0 {
                ApplicationEvent::Approve
            } else {
                ApplicationEvent::Reject
            };
            service.apply_event(&id, decision, "admin").await?;
            Ok::<_, LifecycleError>(id)
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let log = service.log_snapshot().await;
    assert_eq!(log.len(), 60);
    for (subject, replayed) in log.replay_all() {
        let stored = service.store().current_state(&subject).await.unwrap();
        assert_eq!(replayed.unwrap(), stored);
        assert_eq!(log.current_state(&subject), stored);
    }
}

#[tokio::test]
async fn log_survives_file_round_trip() {
    let service = TransitionService::new(Arc::new(InMemorySubjectStore::new()));
    service.open("app-1").await.unwrap();
    for target in ["SUBMITTED", "UNDER_REVIEW", "APPROVED", "REVOKED", "DRAFT"] {
        service.transition("app-1", target, "admin").await.unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transitions.jsonl");
    service.log_snapshot().await.save_to_file(&path).await.unwrap();

    let loaded = TransitionLog::load_from_file(&path).await.unwrap();
    assert_eq!(loaded, service.log_snapshot().await);
    assert_eq!(loaded.replay("app-1").unwrap(), ApplicationState::Draft);
}
