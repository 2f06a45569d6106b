use crate::common::MockBoatService;
use boatyard::backend::{BackendError, BOAT_LOCATION_FIELDS};
use boatyard::boat::{BoatDraft, RecordField};
use boatyard::ui::core::{Action, TaskManager, WidgetId};
use std::sync::Arc;

#[tokio::test]
async fn test_task_manager_creation() {
    let (task_manager, _rx) = TaskManager::new(Arc::new(MockBoatService::new()));
    assert_eq!(task_manager.task_count(), 0);
}

#[tokio::test]
async fn test_non_request_actions_are_not_dispatched() {
    let (mut task_manager, _rx) = TaskManager::new(Arc::new(MockBoatService::new()));
    assert!(task_manager.dispatch(Action::Loading(WidgetId::Map)).is_none());
    assert!(task_manager.dispatch(Action::Quit).is_none());
    assert_eq!(task_manager.task_count(), 0);
}

#[tokio::test]
async fn test_query_boats_reports_request_id() {
    let service = Arc::new(MockBoatService::new());
    let (mut task_manager, mut rx) = TaskManager::new(service.clone());

    let task_id = task_manager.dispatch(Action::QueryBoats {
        request: 7,
        boat_type_id: "sail".to_string(),
    });
    assert!(task_id.is_some());

    match rx.recv().await {
        Some(Action::BoatsLoaded { request, result }) => {
            assert_eq!(request, 7);
            assert_eq!(result.unwrap().len(), 2);
        }
        other => panic!("unexpected action: {:?}", other),
    }
    assert_eq!(service.calls(), vec!["get_boats:sail".to_string()]);
}

#[tokio::test]
async fn test_fetch_boat_location() {
    let (mut task_manager, mut rx) = TaskManager::new(Arc::new(MockBoatService::new()));

    task_manager.dispatch(Action::FetchBoatLocation {
        boat_id: "b2".to_string(),
        fields: BOAT_LOCATION_FIELDS.to_vec(),
    });

    match rx.recv().await {
        Some(Action::BoatLocationLoaded { boat_id, result }) => {
            assert_eq!(boat_id, "b2");
            let data = result.unwrap();
            assert_eq!(data.number(RecordField::Latitude), Some(25.7));
            assert_eq!(data.number(RecordField::Longitude), Some(-80.2));
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_update_failure_is_reported() {
    let service = MockBoatService::failing_updates(BackendError::InvalidData("price too high".to_string()));
    let (mut task_manager, mut rx) = TaskManager::new(Arc::new(service));

    task_manager.dispatch(Action::UpdateBoats {
        drafts: vec![BoatDraft::new("b1")],
    });

    assert_eq!(
        rx.recv().await,
        Some(Action::BoatsUpdated(Err(BackendError::InvalidData("price too high".to_string()))))
    );
}

#[tokio::test]
async fn test_finished_tasks_are_cleaned_up() {
    let (mut task_manager, mut rx) = TaskManager::new(Arc::new(MockBoatService::new()));

    let task_id = task_manager.dispatch(Action::LoadBoatTypes).unwrap();
    assert_eq!(task_manager.task_count(), 1);
    assert!(matches!(rx.recv().await, Some(Action::BoatTypesLoaded(Ok(_)))));

    // The sender fires just before the task body returns
    let mut finished = Vec::new();
    for _ in 0..50 {
        finished.extend(task_manager.cleanup_finished_tasks());
        if task_manager.task_count() == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(finished, vec![task_id]);
    assert_eq!(task_manager.task_count(), 0);
}

#[tokio::test]
async fn test_cancel_all_tasks() {
    let (mut task_manager, _rx) = TaskManager::new(Arc::new(MockBoatService::new()));
    task_manager.dispatch(Action::LoadBoatTypes);
    task_manager.dispatch(Action::QueryBoats {
        request: 1,
        boat_type_id: String::new(),
    });

    task_manager.cancel_all_tasks();
    assert_eq!(task_manager.task_count(), 0);
}
