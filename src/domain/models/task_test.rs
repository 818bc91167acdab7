use crate::domain::models::task::{DomainError, Task, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

fn t0() -> DateTime<Utc> {
    "2025-01-01T09:00:00Z".parse().unwrap()
}

fn new_task() -> Task {
    Task::new("Call the customer back".to_string(), None, Some(Uuid::new_v4()))
}

#[test]
fn test_start_sets_started_at() {
    let task = new_task().start(t0()).unwrap();

    assert!(task.is_running());
    assert_eq!(task.started_at, Some(t0().into()));
    assert_eq!(task.status, TaskStatus::Open);
}

#[test]
fn test_start_rejected_while_running() {
    let task = new_task().start(t0()).unwrap();

    let result = task.start(t0() + Duration::seconds(5));

    assert!(matches!(result, Err(DomainError::InvalidStateTransition)));
}

#[test]
fn test_start_rejected_on_closed_task() {
    let approver = Uuid::new_v4();
    let task = new_task().close(approver, t0()).unwrap();

    let result = task.start(t0() + Duration::seconds(5));

    assert!(matches!(result, Err(DomainError::InvalidStateTransition)));
}

#[test]
fn test_pause_folds_elapsed_time() {
    let task = new_task().start(t0()).unwrap();
    let task = task.pause(t0() + Duration::seconds(100)).unwrap();

    assert_eq!(task.time_spent_seconds, 100);
    assert!(!task.is_running());
    assert_eq!(task.status, TaskStatus::Pending);
}

#[test]
fn test_pause_rejected_while_not_running() {
    let result = new_task().pause(t0());

    assert!(matches!(result, Err(DomainError::InvalidStateTransition)));
}

#[test]
fn test_no_double_counting_across_pause_resume() {
    // T0启动，T0+100暂停，T0+200恢复，T0+250暂停 → 累计150秒
    let task = new_task().start(t0()).unwrap();
    let task = task.pause(t0() + Duration::seconds(100)).unwrap();
    assert_eq!(task.time_spent_seconds, 100);

    let task = task.start(t0() + Duration::seconds(200)).unwrap();
    let task = task.pause(t0() + Duration::seconds(250)).unwrap();

    assert_eq!(task.time_spent_seconds, 150);
}

#[test]
fn test_close_folds_in_flight_time_in_same_update() {
    let approver = Uuid::new_v4();
    let task = new_task().start(t0()).unwrap();

    let closed = task.close(approver, t0() + Duration::seconds(42)).unwrap();

    assert_eq!(closed.time_spent_seconds, 42);
    assert!(closed.started_at.is_none());
    assert_eq!(closed.status, TaskStatus::Closed);
    assert_eq!(closed.closed_approved_by, Some(approver));
    assert_eq!(closed.closed_at, Some((t0() + Duration::seconds(42)).into()));
}

#[test]
fn test_close_rejected_on_closed_task() {
    let approver = Uuid::new_v4();
    let task = new_task().close(approver, t0()).unwrap();

    let result = task.close(approver, t0() + Duration::seconds(1));

    assert!(matches!(result, Err(DomainError::InvalidStateTransition)));
}

#[test]
fn test_closed_task_is_never_an_escalation_candidate() {
    let approver = Uuid::new_v4();
    let mut task = new_task();
    task.due_at = Some((t0() - Duration::hours(1)).into());

    assert!(task.is_escalation_candidate());

    let closed = task.close(approver, t0()).unwrap();
    assert!(!closed.is_escalation_candidate());
}

#[test]
fn test_escalated_task_is_not_a_candidate() {
    let mut task = new_task();
    task.escalated_at = Some(t0().into());

    assert!(!task.is_escalation_candidate());
}
