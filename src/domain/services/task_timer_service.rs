// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::{
    NotificationKind, NotificationPayload, NotificationRequest,
};
use crate::domain::models::task::{DomainError, Task};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::notification_service::NotificationDispatcher;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// 计时服务错误类型
#[derive(Error, Debug)]
pub enum TimerError {
    /// 领域错误
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 任务计时服务
///
/// 驱动任务状态机的读取-转换-持久化流程，并在分配和关闭时
/// 发送相应通知。审批授权通过用户角色查询（外部授权协作方）
/// 判定，状态机本身只约束转换合法性。
pub struct TaskTimerService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    tasks: Arc<T>,
    users: Arc<U>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<T, U> TaskTimerService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    /// 创建新的任务计时服务实例
    pub fn new(tasks: Arc<T>, users: Arc<U>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            tasks,
            users,
            dispatcher,
        }
    }

    /// 创建任务
    ///
    /// 若任务带有负责人，发送task_assigned通知。
    pub async fn create(&self, task: Task) -> Result<Task, TimerError> {
        let created = self.tasks.create(&task).await?;

        if let Some(assignee) = created.assigned_to {
            self.dispatch(NotificationRequest::new(
                assignee,
                NotificationKind::TaskAssigned,
                self.payload(&created),
            ))
            .await;
        }

        Ok(created)
    }

    /// 获取任务
    pub async fn get(&self, task_id: Uuid) -> Result<Task, TimerError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(task)
    }

    /// 添加团队协作人并通知
    pub async fn assign(&self, task_id: Uuid, user_id: Uuid) -> Result<(), TimerError> {
        let task = self.get(task_id).await?;
        self.tasks.add_assignee(task_id, user_id).await?;

        self.dispatch(NotificationRequest::new(
            user_id,
            NotificationKind::TaskAssigned,
            self.payload(&task),
        ))
        .await;

        Ok(())
    }

    /// 启动任务计时器
    pub async fn start(&self, task_id: Uuid, now: DateTime<Utc>) -> Result<Task, TimerError> {
        let task = self.get(task_id).await?;
        let task = task.start(now)?;
        Ok(self.tasks.update(&task).await?)
    }

    /// 暂停任务计时器
    pub async fn pause(&self, task_id: Uuid, now: DateTime<Utc>) -> Result<Task, TimerError> {
        let task = self.get(task_id).await?;
        let task = task.pause(now)?;
        Ok(self.tasks.update(&task).await?)
    }

    /// 关闭任务
    ///
    /// 审批人必须具有关闭审批权限；权限不足与非法状态转换一样
    /// 以InvalidStateTransition拒绝。关闭成功后向观察者集合
    /// （负责人及团队协作人）发送status_change通知。
    pub async fn close(
        &self,
        task_id: Uuid,
        approved_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Task, TimerError> {
        let approver = self
            .users
            .find_by_id(approved_by)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        if !approver.role.can_approve_closure() {
            return Err(DomainError::InvalidStateTransition.into());
        }

        let task = self.get(task_id).await?;
        let task = task.close(approved_by, now)?;
        let closed = self.tasks.update(&task).await?;

        self.notify_watchers(&closed).await;

        Ok(closed)
    }

    /// 向观察者集合发送状态变更通知
    async fn notify_watchers(&self, task: &Task) {
        let watchers = match self.tasks.watchers(task.id).await {
            Ok(watchers) => watchers,
            Err(e) => {
                warn!(task_id = %task.id, "Failed to load watchers: {}", e);
                return;
            }
        };

        for watcher in watchers {
            self.dispatch(NotificationRequest::new(
                watcher,
                NotificationKind::StatusChange,
                self.payload(task),
            ))
            .await;
        }
    }

    fn payload(&self, task: &Task) -> NotificationPayload {
        NotificationPayload {
            task_id: task.id,
            title: task.title.clone(),
            deadline: crate::domain::countdown::effective_deadline(task),
        }
    }

    async fn dispatch(&self, request: NotificationRequest) {
        if let Err(e) = self.dispatcher.notify(&request).await {
            warn!(
                recipient = %request.recipient,
                kind = %request.kind,
                "Notification dispatch failed: {}",
                e
            );
            metrics::counter!("tasksla_notification_failures_total").increment(1);
        }
    }
}
