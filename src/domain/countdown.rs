// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskStatus};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

/// 紧急窗口（秒）：剩余时间落入 (0, 3600) 视为紧急
pub const URGENT_WINDOW_SECONDS: i64 = 3600;

/// 倒计时快照
///
/// 任务在某一时刻的计时状态，是 (task, now) 的纯函数结果。
/// 与任何刷新节奏解耦：定时器、按需轮询或推送驱动的刷新
/// 都可以调用同一计算而不改变契约。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    /// 是否已逾期
    pub is_overdue: bool,
    /// 是否处于紧急窗口
    pub is_urgent: bool,
    /// 剩余秒数（有符号），无截止时间来源时为空
    pub seconds_remaining: Option<i64>,
    /// 生效截止时间
    pub deadline: Option<DateTime<FixedOffset>>,
}

impl Countdown {
    /// 计算任务在now时刻的倒计时状态
    ///
    /// 截止时间来源的优先级：
    /// 1. 已关闭的任务没有倒计时；
    /// 2. 自定义时长计时器已启动时，deadline = started_at + custom_duration_seconds，
    ///    即使同时存在due_at也以计时器为准；
    /// 3. 否则使用due_at；
    /// 4. 两者都没有时任务不存在截止时间，永不逾期。
    pub fn compute(task: &Task, now: DateTime<Utc>) -> Self {
        if task.status == TaskStatus::Closed {
            return Self::none();
        }

        let deadline = effective_deadline(task);
        match deadline {
            Some(deadline) => {
                let seconds_remaining = (deadline.with_timezone(&Utc) - now).num_seconds();
                Self {
                    is_overdue: seconds_remaining < 0,
                    is_urgent: seconds_remaining > 0
                        && seconds_remaining < URGENT_WINDOW_SECONDS,
                    seconds_remaining: Some(seconds_remaining),
                    deadline: Some(deadline),
                }
            }
            None => Self::none(),
        }
    }

    fn none() -> Self {
        Self {
            is_overdue: false,
            is_urgent: false,
            seconds_remaining: None,
            deadline: None,
        }
    }
}

/// 计算任务的生效截止时间
///
/// 自定义时长计时器需要started_at才生效；任务是否关闭在此不判定，
/// 升级协议只对未关闭任务调用本函数。
pub fn effective_deadline(task: &Task) -> Option<DateTime<FixedOffset>> {
    match (task.custom_duration_seconds, task.started_at) {
        (Some(duration), Some(started_at)) => Some(started_at + Duration::seconds(duration)),
        _ => task.due_at,
    }
}

/// 计算自启动以来的运行时长（秒）
///
/// 整秒向下截断，时钟回拨时夹取为0，保证time_spent_seconds
/// 单调不减。
pub fn elapsed_since_start(started_at: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    (now - started_at.with_timezone(&Utc)).num_seconds().max(0)
}

#[cfg(test)]
#[path = "countdown_test.rs"]
mod tests;
