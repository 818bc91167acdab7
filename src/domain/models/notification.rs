// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 通知类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 任务已分配
    TaskAssigned,
    /// 任务已升级给主管
    Escalation,
    /// 任务状态变更
    StatusChange,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotificationKind::TaskAssigned => write!(f, "task_assigned"),
            NotificationKind::Escalation => write!(f, "escalation"),
            NotificationKind::StatusChange => write!(f, "status_change"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_assigned" => Ok(NotificationKind::TaskAssigned),
            "escalation" => Ok(NotificationKind::Escalation),
            "status_change" => Ok(NotificationKind::StatusChange),
            _ => Err(()),
        }
    }
}

/// 通知请求
///
/// 发往通知分发器的单条请求。投递语义为尽力而为，
/// 分发器依据幂等键去重，核心不要求更强的投递保证。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// 接收人ID
    pub recipient: Uuid,
    /// 通知类型
    pub kind: NotificationKind,
    /// 通知负载
    pub payload: NotificationPayload,
}

/// 通知负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// 任务ID
    pub task_id: Uuid,
    /// 任务标题
    pub title: String,
    /// 生效截止时间（升级通知携带；自定义时长计时器优先于due_at）
    pub deadline: Option<DateTime<FixedOffset>>,
}

impl NotificationRequest {
    /// 创建一个新的通知请求
    pub fn new(recipient: Uuid, kind: NotificationKind, payload: NotificationPayload) -> Self {
        Self {
            recipient,
            kind,
            payload,
        }
    }

    /// 生成幂等键
    ///
    /// 同一任务、同一类型、同一接收人的重复请求在分发侧视为同一条。
    pub fn idempotency_key(&self) -> String {
        format!("{}:{}:{}", self.kind, self.payload.task_id, self.recipient)
    }
}
