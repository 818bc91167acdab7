// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::countdown::Countdown;
use crate::domain::models::notification::{
    NotificationKind, NotificationPayload, NotificationRequest,
};
use crate::domain::models::task::Task;
use crate::domain::repositories::task_repository::{
    EscalationClaim, RepositoryError, TaskRepository,
};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::notification_service::NotificationDispatcher;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 单次升级尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscalationOutcome {
    /// 本次调用完成了认领
    Escalated { escalated_to: Option<Uuid> },
    /// 另一执行者已经认领，本次为成功的空操作
    AlreadyEscalated,
    /// 任务不满足升级条件（已关闭或未逾期）
    NotEligible,
}

/// 升级协议服务
///
/// 保证每个逾期且符合条件的任务恰好升级一次，对并发触发者
/// （多个客户端的本地倒计时和周期扫描器同时竞争）保持正确。
/// 唯一的同步原语是仓库层的条件更新；认领成功后的通知投递
/// 为尽力而为，失败不回滚认领。
pub struct EscalationService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    tasks: Arc<T>,
    users: Arc<U>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<T, U> EscalationService<T, U>
where
    T: TaskRepository,
    U: UserRepository,
{
    /// 创建新的升级协议服务实例
    pub fn new(tasks: Arc<T>, users: Arc<U>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            tasks,
            users,
            dispatcher,
        }
    }

    /// 对单个任务执行升级协议
    ///
    /// 协议步骤：
    /// 1. 重新读取任务并在执行时刻重算资格，不信任调用方缓存的
    ///    逾期标志；
    /// 2. 按创建时间选择第一个可用的主管类用户；没有可用目标时
    ///    仍然标记升级，只跳过定向通知（保留自来源系统的兼容行为）；
    /// 3. 条件更新认领，零行命中视为成功空操作；
    /// 4. 认领成功后向升级目标发送通知，并尽力广播告警给全部
    ///    经理角色用户。
    ///
    /// # 参数
    ///
    /// * `task_id` - 疑似逾期且未升级的任务ID
    /// * `now` - 执行时刻
    ///
    /// # 返回值
    ///
    /// * `Ok(EscalationOutcome)` - 协议执行结果
    /// * `Err(RepositoryError)` - 存储不可用或任务不存在
    pub async fn escalate(
        &self,
        task_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<EscalationOutcome, RepositoryError> {
        // Step 1: 执行时刻的新读取
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if !task.is_escalation_candidate() {
            debug!(task_id = %task_id, "Task is closed or already escalated, skipping");
            return Ok(EscalationOutcome::NotEligible);
        }

        let countdown = Countdown::compute(&task, now);
        if !countdown.is_overdue {
            debug!(task_id = %task_id, "Task is not overdue at execution time, skipping");
            return Ok(EscalationOutcome::NotEligible);
        }

        // Step 2: 选择升级目标
        let target = self.users.first_supervisor().await?;
        if target.is_none() {
            warn!(
                task_id = %task_id,
                "No supervisor available, escalating without a target"
            );
        }
        let target_id = target.as_ref().map(|user| user.id);

        // Step 3: 原子认领
        let claim = self
            .tasks
            .claim_escalation(task_id, now.into(), target_id)
            .await?;

        let task = match claim {
            EscalationClaim::Claimed(task) => task,
            EscalationClaim::Lost => {
                debug!(task_id = %task_id, "Escalation claim lost to a concurrent actor");
                metrics::counter!("tasksla_escalation_claims_lost_total").increment(1);
                return Ok(EscalationOutcome::AlreadyEscalated);
            }
        };

        info!(
            task_id = %task_id,
            escalated_to = ?target_id,
            "Task escalated"
        );
        metrics::counter!("tasksla_escalations_claimed_total").increment(1);

        // Step 4: 尽力而为的通知，失败只记录日志
        if let Some(target_id) = target_id {
            self.dispatch(NotificationRequest::new(
                target_id,
                NotificationKind::Escalation,
                self.escalation_payload(&task),
            ))
            .await;
        }
        self.alert_managers(&task).await;

        Ok(EscalationOutcome::Escalated {
            escalated_to: target_id,
        })
    }

    /// 向全部经理角色用户广播升级告警
    ///
    /// 查询失败或单条投递失败均不影响已完成的认领。
    async fn alert_managers(&self, task: &Task) {
        let managers = match self.users.managers().await {
            Ok(managers) => managers,
            Err(e) => {
                warn!("Failed to load managers for escalation alert: {}", e);
                return;
            }
        };

        for manager in managers {
            self.dispatch(NotificationRequest::new(
                manager.id,
                NotificationKind::Escalation,
                self.escalation_payload(task),
            ))
            .await;
        }
    }

    fn escalation_payload(&self, task: &Task) -> NotificationPayload {
        NotificationPayload {
            task_id: task.id,
            title: task.title.clone(),
            // 对外报告的截止时间与逾期判定同源
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

#[cfg(test)]
#[path = "escalation_service_test.rs"]
mod tests;
