// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::countdown::Countdown;
use crate::domain::models::task::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 任务响应数据传输对象
///
/// 任务字段附带按请求时刻计算的倒计时快照
#[derive(Debug, Serialize)]
pub struct TaskResponseDto {
    /// 任务字段
    #[serde(flatten)]
    pub task: Task,
    /// 倒计时快照
    pub countdown: Countdown,
}

impl TaskResponseDto {
    /// 由任务和当前时刻构建响应
    pub fn from_task(task: Task, now: DateTime<Utc>) -> Self {
        let countdown = Countdown::compute(&task, now);
        Self { task, countdown }
    }
}

/// 扫描结果响应数据传输对象
#[derive(Debug, Serialize)]
pub struct SweepResponseDto {
    /// 本轮成功升级的任务数量
    pub escalated: u64,
}

/// 升级触发响应数据传输对象
#[derive(Debug, Serialize)]
pub struct EscalationResponseDto {
    /// 升级尝试结果
    pub outcome: String,
}
