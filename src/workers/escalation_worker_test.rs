#[cfg(test)]
mod tests {
    use crate::domain::models::notification::{NotificationKind, NotificationRequest};
    use crate::domain::models::task::{Task, TaskStatus};
    use crate::domain::models::user::{User, UserRole};
    use crate::domain::repositories::task_repository::TaskRepository;
    use crate::domain::repositories::user_repository::UserRepository;
    use crate::domain::services::escalation_service::EscalationService;
    use crate::domain::services::notification_service::NotificationDispatcher;
    use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
    use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
    use crate::workers::escalation_worker::EscalationWorker;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use std::sync::{Arc, Mutex};
    use std::time::Duration as StdDuration;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingDispatcher {
        sent: Mutex<Vec<NotificationRequest>>,
    }

    #[async_trait]
    impl NotificationDispatcher for RecordingDispatcher {
        async fn notify(&self, request: &NotificationRequest) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    async fn setup_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let db = Arc::new(db);
        Migrator::up(db.as_ref(), None).await.unwrap();
        db
    }

    fn worker(
        tasks: Arc<TaskRepositoryImpl>,
        users: Arc<UserRepositoryImpl>,
        dispatcher: Arc<RecordingDispatcher>,
    ) -> EscalationWorker<TaskRepositoryImpl, UserRepositoryImpl> {
        let service = Arc::new(EscalationService::new(
            tasks.clone(),
            users,
            dispatcher,
        ));
        EscalationWorker::new(tasks, service, StdDuration::from_secs(60))
    }

    async fn create_task(
        repo: &TaskRepositoryImpl,
        status: TaskStatus,
        due_offset_minutes: Option<i64>,
        escalated: bool,
    ) -> Task {
        let mut task = Task::new("Chase the invoice".to_string(), None, Some(Uuid::new_v4()));
        task.status = status;
        if let Some(offset) = due_offset_minutes {
            task.due_at = Some((Utc::now() + Duration::minutes(offset)).into());
        }
        if escalated {
            task.escalated_at = Some(Utc::now().into());
        }
        repo.create(&task).await.unwrap()
    }

    async fn create_supervisor(repo: &UserRepositoryImpl) -> User {
        let user = User::new(
            "Supervisor".to_string(),
            "supervisor@example.com".to_string(),
            UserRole::Supervisor,
        );
        repo.create(&user).await.unwrap()
    }

    #[tokio::test]
    async fn test_sweep_escalates_only_overdue_unescalated_open_tasks() {
        let db = setup_db().await;
        let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
        let users = Arc::new(UserRepositoryImpl::new(db));
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let supervisor = create_supervisor(&users).await;

        // 逾期未升级：应当被升级
        let overdue = create_task(&tasks, TaskStatus::Open, Some(-10), false).await;
        // 逾期但已关闭：永不升级
        create_task(&tasks, TaskStatus::Closed, Some(-10), false).await;
        // 逾期但已升级：不重复升级
        create_task(&tasks, TaskStatus::Open, Some(-10), true).await;
        // 未逾期：不升级
        create_task(&tasks, TaskStatus::Open, Some(30), false).await;
        // 没有截止时间：不升级
        create_task(&tasks, TaskStatus::Open, None, false).await;

        let worker = worker(tasks.clone(), users, dispatcher.clone());
        let count = worker.sweep(Utc::now()).await.unwrap();

        assert_eq!(count, 1);

        let stored = tasks.find_by_id(overdue.id).await.unwrap().unwrap();
        assert!(stored.escalated_at.is_some());
        assert_eq!(stored.escalated_to, Some(supervisor.id));

        let escalations = dispatcher
            .sent
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == NotificationKind::Escalation)
            .count();
        assert_eq!(escalations, 1);
    }

    #[tokio::test]
    async fn test_resweep_is_idempotent() {
        let db = setup_db().await;
        let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
        let users = Arc::new(UserRepositoryImpl::new(db));
        let dispatcher = Arc::new(RecordingDispatcher::default());
        create_supervisor(&users).await;

        create_task(&tasks, TaskStatus::Open, Some(-10), false).await;
        create_task(&tasks, TaskStatus::Pending, Some(-5), false).await;

        let worker = worker(tasks, users, dispatcher.clone());

        let first = worker.sweep(Utc::now()).await.unwrap();
        let second = worker.sweep(Utc::now()).await.unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        // 每个任务恰好一条升级通知
        assert_eq!(dispatcher.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sweep_end_to_end_scenario() {
        // due_at = 2025-01-01T00:00:00Z，扫描发生在00:05:00Z
        let db = setup_db().await;
        let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
        let users = Arc::new(UserRepositoryImpl::new(db));
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let supervisor = create_supervisor(&users).await;

        let sweep_at: DateTime<Utc> = "2025-01-01T00:05:00Z".parse().unwrap();
        let due_at: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();

        let mut task = Task::new("Close the Q4 deal".to_string(), None, None);
        task.due_at = Some(due_at.into());
        let task = tasks.create(&task).await.unwrap();

        let worker = worker(tasks.clone(), users, dispatcher.clone());
        let count = worker.sweep(sweep_at).await.unwrap();

        assert_eq!(count, 1);

        let stored = tasks.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.escalated_at, Some(sweep_at.into()));
        assert_eq!(stored.escalated_to, Some(supervisor.id));

        let sent = dispatcher.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, supervisor.id);
        assert_eq!(sent[0].payload.task_id, task.id);
        assert_eq!(sent[0].payload.deadline, Some(due_at.into()));
    }

    #[tokio::test]
    async fn test_sweep_with_no_candidates_reports_zero() {
        let db = setup_db().await;
        let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
        let users = Arc::new(UserRepositoryImpl::new(db));
        let dispatcher = Arc::new(RecordingDispatcher::default());

        let worker = worker(tasks, users, dispatcher);
        let count = worker.sweep(Utc::now()).await.unwrap();

        assert_eq!(count, 0);
    }
}
