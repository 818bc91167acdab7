// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::countdown::Countdown;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::escalation_service::{EscalationOutcome, EscalationService};
use crate::utils::errors::WorkerError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 升级扫描工作器
///
/// 周期性扫描全部升级候选任务并对逾期者驱动升级协议，
/// 兜底没有任何交互客户端盯着的任务。单个任务的失败不会
/// 中断本轮批次；本轮不重试，下一轮调度自然覆盖仍然符合
/// 条件的任务。
pub struct EscalationWorker<T, U>
where
    T: TaskRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    repository: Arc<T>,
    service: Arc<EscalationService<T, U>>,
    interval: Duration,
}

impl<T, U> EscalationWorker<T, U>
where
    T: TaskRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(
        repository: Arc<T>,
        service: Arc<EscalationService<T, U>>,
        interval: Duration,
    ) -> Self {
        Self {
            repository,
            service,
            interval,
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Escalation sweep worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep(Utc::now()).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Escalated {} overdue tasks", count);
                    }
                }
                Err(e) => {
                    error!("Escalation sweep failed: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let worker = Arc::clone(self);
        tokio::spawn(async move {
            worker.run().await;
        })
    }

    /// 执行一轮扫描
    ///
    /// # 参数
    ///
    /// * `now` - 扫描时刻，逾期判定和认领时间戳同源
    ///
    /// # 返回值
    ///
    /// * `Ok(u64)` - 本轮成功完成认领的任务数量
    /// * `Err(WorkerError)` - 候选查询失败
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<u64, WorkerError> {
        let candidates = self
            .repository
            .find_escalation_candidates()
            .await
            .map_err(|e| WorkerError::RepositoryError(e.to_string()))?;

        let mut escalated = 0u64;
        for task in candidates {
            if !Countdown::compute(&task, now).is_overdue {
                continue;
            }

            match self.service.escalate(task.id, now).await {
                Ok(EscalationOutcome::Escalated { .. }) => escalated += 1,
                Ok(_) => {}
                Err(e) => {
                    // 单个任务失败不中断批次
                    warn!(task_id = %task.id, "Failed to escalate task: {}", e);
                }
            }
        }

        metrics::counter!("tasksla_sweeps_total").increment(1);
        Ok(escalated)
    }
}

#[cfg(test)]
#[path = "escalation_worker_test.rs"]
mod tests;
