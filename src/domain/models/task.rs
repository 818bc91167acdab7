// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::countdown;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 任务实体
///
/// 表示销售团队中一个带截止时间的工作单元。任务可以由固定
/// 截止时间（due_at）或自定义时长计时器（custom_duration_seconds）
/// 驱动倒计时，两者同时存在时以运行中的自定义时长计时器为准。
/// 所有可选字段始终存在（可为空），不做运行时模式探测。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 任务标题
    pub title: String,
    /// 任务描述
    pub description: Option<String>,
    /// 固定截止时间（可选）
    pub due_at: Option<DateTime<FixedOffset>>,
    /// 自定义时长（秒），从计时器启动时刻起算（可选）
    pub custom_duration_seconds: Option<i64>,
    /// 计时器启动时间，非空表示计时器正在运行
    pub started_at: Option<DateTime<FixedOffset>>,
    /// 累计工作时长（秒），仅在计时器运行期间按墙钟时间增长
    pub time_spent_seconds: i64,
    /// 任务状态
    pub status: TaskStatus,
    /// 升级时间，非空表示升级已被认领，一经设置不可变更
    pub escalated_at: Option<DateTime<FixedOffset>>,
    /// 接收升级的主管ID
    pub escalated_to: Option<Uuid>,
    /// 负责人ID
    pub assigned_to: Option<Uuid>,
    /// 所属部门
    pub department: Option<String>,
    /// 关闭审批人ID，仅在主管关闭任务时设置
    pub closed_approved_by: Option<Uuid>,
    /// 关闭时间
    pub closed_at: Option<DateTime<FixedOffset>>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Open ⇄ Pending → Closed（Closed为终态，不支持重新打开）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 打开中，任务已创建或正在被处理
    #[default]
    Open,
    /// 挂起中，计时器已暂停或等待审核
    Pending,
    /// 已关闭，主管审批通过后的终态
    Closed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "pending" => Ok(TaskStatus::Pending),
            "closed" => Ok(TaskStatus::Closed),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换，当任务状态转换不符合业务规则时发生
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Task {
    /// 创建一个新的任务
    ///
    /// # 参数
    ///
    /// * `title` - 任务标题
    /// * `description` - 任务描述
    /// * `assigned_to` - 负责人ID
    ///
    /// # 返回值
    ///
    /// 返回新创建的任务实例，状态为Open，计时器未启动
    pub fn new(title: String, description: Option<String>, assigned_to: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            due_at: None,
            custom_duration_seconds: None,
            started_at: None,
            time_spent_seconds: 0,
            status: TaskStatus::Open,
            escalated_at: None,
            escalated_to: None,
            assigned_to,
            department: None,
            closed_approved_by: None,
            closed_at: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    /// 判断计时器是否正在运行
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// 判断任务是否为升级候选
    ///
    /// 仅当任务未关闭且升级尚未被认领时，任务才可能被升级。
    /// 是否逾期由倒计时模型单独判定。
    pub fn is_escalation_candidate(&self) -> bool {
        self.status != TaskStatus::Closed && self.escalated_at.is_none()
    }

    /// 启动计时器
    ///
    /// 允许从Open/Pending状态启动；已关闭或已在运行的任务拒绝启动。
    /// 从Pending恢复时状态回到Open。
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 计时器已启动的任务
    /// * `Err(DomainError)` - 状态转换失败
    pub fn start(mut self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if self.status == TaskStatus::Closed || self.is_running() {
            return Err(DomainError::InvalidStateTransition);
        }
        self.started_at = Some(now.into());
        self.status = TaskStatus::Open;
        self.updated_at = now.into();
        Ok(self)
    }

    /// 暂停计时器
    ///
    /// 将本轮运行时长折算进time_spent_seconds并清空started_at，
    /// 状态转为Pending。折算按整秒向下截断，暂停/恢复循环间
    /// 不保留亚秒精度。
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 已暂停的任务
    /// * `Err(DomainError)` - 计时器未运行或任务已关闭
    pub fn pause(mut self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if self.status == TaskStatus::Closed {
            return Err(DomainError::InvalidStateTransition);
        }
        let started_at = self
            .started_at
            .ok_or(DomainError::InvalidStateTransition)?;
        self.time_spent_seconds += countdown::elapsed_since_start(started_at, now);
        self.started_at = None;
        self.status = TaskStatus::Pending;
        self.updated_at = now.into();
        Ok(self)
    }

    /// 关闭任务
    ///
    /// 若计时器正在运行，先将在途运行时长折算进time_spent_seconds
    /// 并清空started_at，与状态变更合并为同一次更新。关闭后的任务
    /// 永远不再是升级候选，也不支持重新打开。审批权限由调用方
    /// 通过授权协作方校验，此处只约束状态机合法性。
    ///
    /// # 参数
    ///
    /// * `approved_by` - 审批人ID
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 已关闭的任务
    /// * `Err(DomainError)` - 任务已经关闭
    pub fn close(mut self, approved_by: Uuid, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if self.status == TaskStatus::Closed {
            return Err(DomainError::InvalidStateTransition);
        }
        if let Some(started_at) = self.started_at {
            self.time_spent_seconds += countdown::elapsed_since_start(started_at, now);
            self.started_at = None;
        }
        self.status = TaskStatus::Closed;
        self.closed_approved_by = Some(approved_by);
        self.closed_at = Some(now.into());
        self.updated_at = now.into();
        Ok(self)
    }
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
