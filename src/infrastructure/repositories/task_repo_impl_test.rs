#[cfg(test)]
mod tests {
    use crate::domain::models::task::{Task, TaskStatus};
    use crate::domain::repositories::task_repository::{EscalationClaim, TaskRepository};
    use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
    use chrono::{Duration, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use std::sync::Arc;
    use uuid::Uuid;

    async fn setup_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let db = Arc::new(db);
        Migrator::up(db.as_ref(), None).await.unwrap();
        db
    }

    fn overdue_task() -> Task {
        let mut task = Task::new("Renew contract".to_string(), None, Some(Uuid::new_v4()));
        task.due_at = Some((Utc::now() - Duration::minutes(10)).into());
        task
    }

    #[tokio::test]
    async fn test_claim_escalation_succeeds_once_then_loses() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);
        let supervisor = Uuid::new_v4();

        let task = repo.create(&overdue_task()).await.unwrap();

        let first = repo
            .claim_escalation(task.id, Utc::now().into(), Some(supervisor))
            .await
            .unwrap();
        let claimed = match first {
            EscalationClaim::Claimed(task) => task,
            EscalationClaim::Lost => panic!("first claim must succeed"),
        };
        assert!(claimed.escalated_at.is_some());
        assert_eq!(claimed.escalated_to, Some(supervisor));

        // 第二次条件更新命中零行
        let second = repo
            .claim_escalation(task.id, Utc::now().into(), Some(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(matches!(second, EscalationClaim::Lost));

        // 首次认领的字段保持不变
        let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.escalated_to, Some(supervisor));
        assert_eq!(stored.escalated_at, claimed.escalated_at);
    }

    #[tokio::test]
    async fn test_update_from_stale_snapshot_preserves_won_claim() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);
        let supervisor = Uuid::new_v4();

        let task = repo.create(&overdue_task()).await.unwrap();

        // 用户端在认领发生之前读取了任务
        let stale = repo.find_by_id(task.id).await.unwrap().unwrap();

        let claim = repo
            .claim_escalation(task.id, Utc::now().into(), Some(supervisor))
            .await
            .unwrap();
        assert!(matches!(claim, EscalationClaim::Claimed(_)));

        // 基于过期快照的计时转换全量写回，不得清掉已赢得的认领
        let started = stale.start(Utc::now()).unwrap();
        let updated = repo.update(&started).await.unwrap();

        assert!(updated.escalated_at.is_some());
        assert_eq!(updated.escalated_to, Some(supervisor));
        assert!(updated.is_running());

        let stored = repo.find_by_id(task.id).await.unwrap().unwrap();
        assert!(stored.escalated_at.is_some());
        assert_eq!(stored.escalated_to, Some(supervisor));
    }

    #[tokio::test]
    async fn test_claim_escalation_missing_row_is_not_found() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);

        let result = repo
            .claim_escalation(Uuid::new_v4(), Utc::now().into(), None)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_claim_escalation_skips_closed_task() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);

        let mut task = overdue_task();
        task.status = TaskStatus::Closed;
        let task = repo.create(&task).await.unwrap();

        let claim = repo
            .claim_escalation(task.id, Utc::now().into(), None)
            .await
            .unwrap();

        assert!(matches!(claim, EscalationClaim::Lost));
        assert!(repo
            .find_by_id(task.id)
            .await
            .unwrap()
            .unwrap()
            .escalated_at
            .is_none());
    }

    #[tokio::test]
    async fn test_find_escalation_candidates_filters() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);

        // 有due_at的打开任务：候选
        let with_due = repo.create(&overdue_task()).await.unwrap();

        // 已关闭：不是候选
        let mut closed = overdue_task();
        closed.status = TaskStatus::Closed;
        repo.create(&closed).await.unwrap();

        // 已升级：不是候选
        let mut escalated = overdue_task();
        escalated.escalated_at = Some(Utc::now().into());
        repo.create(&escalated).await.unwrap();

        // 没有任何截止时间来源：不是候选
        let no_deadline = Task::new("Untimed errand".to_string(), None, None);
        repo.create(&no_deadline).await.unwrap();

        // 自定义时长计时器已启动：候选
        let mut running = Task::new("Timed visit".to_string(), None, None);
        running.custom_duration_seconds = Some(600);
        running.started_at = Some(Utc::now().into());
        let running = repo.create(&running).await.unwrap();

        // 自定义时长但从未启动、也没有due_at：不是候选
        let mut never_started = Task::new("Untimed visit".to_string(), None, None);
        never_started.custom_duration_seconds = Some(600);
        repo.create(&never_started).await.unwrap();

        let candidates = repo.find_escalation_candidates().await.unwrap();
        let ids: Vec<Uuid> = candidates.iter().map(|t| t.id).collect();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&with_due.id));
        assert!(ids.contains(&running.id));
    }

    #[tokio::test]
    async fn test_watchers_include_assignee_and_team() {
        let db = setup_db().await;
        let repo = TaskRepositoryImpl::new(db);

        let owner = Uuid::new_v4();
        let teammate = Uuid::new_v4();
        let mut task = Task::new("Team deal".to_string(), None, Some(owner));
        task.due_at = Some((Utc::now() + Duration::hours(1)).into());
        let task = repo.create(&task).await.unwrap();

        repo.add_assignee(task.id, teammate).await.unwrap();
        // 负责人重复出现在协作人表时不重复计数
        repo.add_assignee(task.id, owner).await.unwrap();

        let mut watchers = repo.watchers(task.id).await.unwrap();
        watchers.sort();
        let mut expected = vec![owner, teammate];
        expected.sort();

        assert_eq!(watchers, expected);
    }
}
