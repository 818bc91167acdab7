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

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 创建任务请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateTaskRequestDto {
    /// 任务标题
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// 任务描述
    pub description: Option<String>,
    /// 固定截止时间
    pub due_at: Option<DateTime<FixedOffset>>,
    /// 自定义时长（秒）
    #[validate(range(min = 1))]
    pub custom_duration_seconds: Option<i64>,
    /// 负责人ID
    pub assigned_to: Option<Uuid>,
    /// 所属部门
    pub department: Option<String>,
}

/// 状态机转换请求数据传输对象
///
/// actor是发起转换的用户；授权由角色查询判定，不做会话管理。
#[derive(Debug, Deserialize, Serialize)]
pub struct TransitionRequestDto {
    /// 发起人ID
    pub actor: Uuid,
}

/// 添加团队协作人请求数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct AssignRequestDto {
    /// 协作人ID
    pub user_id: Uuid,
}
