// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::Task;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误，对应存储不可用，向调用方传播
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 升级认领结果
///
/// 条件更新命中零行且记录存在时为Lost：另一执行者已经完成认领，
/// 这是一次成功的空操作而非错误，调用方不得重复发送通知。
#[derive(Debug, Clone)]
pub enum EscalationClaim {
    /// 认领成功，携带更新后的任务
    Claimed(Task),
    /// 认领已被其他执行者抢先
    Lost,
}

/// 任务仓库特质
///
/// 定义任务数据访问接口
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError>;
    /// 全量更新任务
    async fn update(&self, task: &Task) -> Result<Task, RepositoryError>;
    /// 原子认领升级
    ///
    /// 等价于 `set escalated_at/escalated_to where id = ? and
    /// escalated_at is null and status != closed` 的比较并交换。
    /// 记录不存在时返回NotFound，与认领失败相区分。
    async fn claim_escalation(
        &self,
        id: Uuid,
        escalated_at: DateTime<FixedOffset>,
        escalated_to: Option<Uuid>,
    ) -> Result<EscalationClaim, RepositoryError>;
    /// 查找升级候选任务
    ///
    /// 未关闭、未升级且存在截止时间来源的任务；是否逾期由调用方
    /// 按当前时刻判定。
    async fn find_escalation_candidates(&self) -> Result<Vec<Task>, RepositoryError>;
    /// 添加团队协作人
    async fn add_assignee(&self, task_id: Uuid, user_id: Uuid) -> Result<(), RepositoryError>;
    /// 查询任务的观察者集合（负责人及团队协作人）
    async fn watchers(&self, task_id: Uuid) -> Result<Vec<Uuid>, RepositoryError>;
}
