use crate::domain::countdown::{effective_deadline, elapsed_since_start, Countdown};
use crate::domain::models::task::{Task, TaskStatus};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

fn fixed_now() -> DateTime<Utc> {
    "2025-01-01T12:00:00Z".parse().unwrap()
}

fn base_task() -> Task {
    Task::new("Follow up lead".to_string(), None, Some(Uuid::new_v4()))
}

#[test]
fn test_overdue_on_due_at_path() {
    let now = fixed_now();
    let mut task = base_task();
    task.due_at = Some((now - Duration::seconds(1)).into());

    let countdown = Countdown::compute(&task, now);

    assert!(countdown.is_overdue);
    assert!(!countdown.is_urgent);
    assert_eq!(countdown.seconds_remaining, Some(-1));
}

#[test]
fn test_overdue_on_custom_duration_path() {
    let now = fixed_now();
    let mut task = base_task();
    task.custom_duration_seconds = Some(3600);
    task.started_at = Some((now - Duration::seconds(3601)).into());

    let countdown = Countdown::compute(&task, now);

    assert!(countdown.is_overdue);
    assert_eq!(countdown.seconds_remaining, Some(-1));
}

#[test]
fn test_urgent_within_one_hour_window() {
    let now = fixed_now();
    let mut task = base_task();
    task.custom_duration_seconds = Some(3600);
    task.started_at = Some((now - Duration::seconds(3599)).into());

    let countdown = Countdown::compute(&task, now);

    assert!(!countdown.is_overdue);
    assert!(countdown.is_urgent);
    assert_eq!(countdown.seconds_remaining, Some(1));
}

#[test]
fn test_zero_remaining_is_neither_overdue_nor_urgent() {
    let now = fixed_now();
    let mut task = base_task();
    task.due_at = Some(now.into());

    let countdown = Countdown::compute(&task, now);

    assert!(!countdown.is_overdue);
    assert!(!countdown.is_urgent);
    assert_eq!(countdown.seconds_remaining, Some(0));
}

#[test]
fn test_running_custom_duration_takes_precedence_over_due_at() {
    let now = fixed_now();
    let mut task = base_task();
    task.due_at = Some((now + Duration::seconds(10_000)).into());
    task.custom_duration_seconds = Some(60);
    task.started_at = Some((now - Duration::seconds(61)).into());

    let countdown = Countdown::compute(&task, now);

    assert!(countdown.is_overdue);
    assert_eq!(countdown.seconds_remaining, Some(-1));
    assert_eq!(
        countdown.deadline,
        Some((now - Duration::seconds(1)).into())
    );
}

#[test]
fn test_custom_duration_without_start_falls_back_to_due_at() {
    let now = fixed_now();
    let mut task = base_task();
    task.due_at = Some((now + Duration::seconds(120)).into());
    task.custom_duration_seconds = Some(60);

    let countdown = Countdown::compute(&task, now);

    assert_eq!(countdown.seconds_remaining, Some(120));
    assert_eq!(effective_deadline(&task), task.due_at);
}

#[test]
fn test_closed_task_has_no_countdown() {
    let now = fixed_now();
    let mut task = base_task();
    task.due_at = Some((now - Duration::hours(5)).into());
    task.status = TaskStatus::Closed;

    let countdown = Countdown::compute(&task, now);

    assert!(!countdown.is_overdue);
    assert!(!countdown.is_urgent);
    assert_eq!(countdown.seconds_remaining, None);
}

#[test]
fn test_no_deadline_source_never_overdue() {
    let now = fixed_now();
    let task = base_task();

    let countdown = Countdown::compute(&task, now);

    assert!(!countdown.is_overdue);
    assert_eq!(countdown.seconds_remaining, None);
    assert_eq!(countdown.deadline, None);
}

#[test]
fn test_elapsed_since_start_truncates_to_whole_seconds() {
    let now = fixed_now();
    let started_at = (now - Duration::milliseconds(99_900)).into();

    assert_eq!(elapsed_since_start(started_at, now), 99);
}

#[test]
fn test_elapsed_since_start_clamps_negative_to_zero() {
    let now = fixed_now();
    let started_at = (now + Duration::seconds(30)).into();

    assert_eq!(elapsed_since_start(started_at, now), 0);
}
