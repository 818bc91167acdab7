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

use crate::domain::models::task::{Task, TaskStatus};
use crate::domain::repositories::task_repository::{
    EscalationClaim, RepositoryError, TaskRepository,
};
use crate::infrastructure::database::entities::task as task_entity;
use crate::infrastructure::database::entities::task_assignee as assignee_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<task_entity::Model> for Task {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status.parse().unwrap_or_default(),
            due_at: model.due_at,
            custom_duration_seconds: model.custom_duration_seconds,
            started_at: model.started_at,
            time_spent_seconds: model.time_spent_seconds,
            escalated_at: model.escalated_at,
            escalated_to: model.escalated_to,
            assigned_to: model.assigned_to,
            department: model.department,
            closed_approved_by: model.closed_approved_by,
            closed_at: model.closed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Task> for task_entity::ActiveModel {
    fn from(task: Task) -> Self {
        Self {
            id: Set(task.id),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            status: Set(task.status.to_string()),
            due_at: Set(task.due_at),
            custom_duration_seconds: Set(task.custom_duration_seconds),
            started_at: Set(task.started_at),
            time_spent_seconds: Set(task.time_spent_seconds),
            escalated_at: Set(task.escalated_at),
            escalated_to: Set(task.escalated_to),
            assigned_to: Set(task.assigned_to),
            department: Set(task.department.clone()),
            closed_approved_by: Set(task.closed_approved_by),
            closed_at: Set(task.closed_at),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
        let model: task_entity::ActiveModel = task.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut model: task_entity::ActiveModel = task.clone().into();

        // 升级字段只允许经由条件认领写入。全量更新基于调用方的
        // 读取快照，若快照早于一次并发认领，写回这两列会清掉
        // 已经赢得的认领。
        model.escalated_at = NotSet;
        model.escalated_to = NotSet;

        let updated_model = model.update(self.db.as_ref()).await?;
        Ok(updated_model.into())
    }

    async fn claim_escalation(
        &self,
        id: Uuid,
        escalated_at: DateTime<FixedOffset>,
        escalated_to: Option<Uuid>,
    ) -> Result<EscalationClaim, RepositoryError> {
        // 条件更新即比较并交换：只有escalated_at仍为空时才命中。
        // 并发竞争者观察到零行命中，按成功空操作处理。
        let result = task_entity::Entity::update_many()
            .col_expr(
                task_entity::Column::EscalatedAt,
                Expr::value::<Option<DateTime<FixedOffset>>>(Some(escalated_at)),
            )
            .col_expr(task_entity::Column::EscalatedTo, Expr::value(escalated_to))
            .col_expr(
                task_entity::Column::UpdatedAt,
                Expr::value::<DateTime<FixedOffset>>(Utc::now().into()),
            )
            .filter(task_entity::Column::Id.eq(id))
            .filter(task_entity::Column::EscalatedAt.is_null())
            .filter(task_entity::Column::Status.ne(TaskStatus::Closed.to_string()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            // 区分"记录不存在"与"认领被抢先"
            return match self.find_by_id(id).await? {
                Some(_) => Ok(EscalationClaim::Lost),
                None => Err(RepositoryError::NotFound),
            };
        }

        let task = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(EscalationClaim::Claimed(task))
    }

    async fn find_escalation_candidates(&self) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Status.ne(TaskStatus::Closed.to_string()))
            .filter(task_entity::Column::EscalatedAt.is_null())
            .filter(
                // 存在某个截止时间来源：due_at，或已启动的自定义时长计时器
                Condition::any()
                    .add(task_entity::Column::DueAt.is_not_null())
                    .add(
                        Condition::all()
                            .add(task_entity::Column::CustomDurationSeconds.is_not_null())
                            .add(task_entity::Column::StartedAt.is_not_null()),
                    ),
            )
            .order_by_asc(task_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn add_assignee(&self, task_id: Uuid, user_id: Uuid) -> Result<(), RepositoryError> {
        let model = assignee_entity::ActiveModel {
            task_id: Set(task_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now().into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(())
    }

    async fn watchers(&self, task_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let task = self
            .find_by_id(task_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let assignees = assignee_entity::Entity::find()
            .filter(assignee_entity::Column::TaskId.eq(task_id))
            .all(self.db.as_ref())
            .await?;

        let mut watchers: Vec<Uuid> = task.assigned_to.into_iter().collect();
        for assignee in assignees {
            if !watchers.contains(&assignee.user_id) {
                watchers.push(assignee.user_id);
            }
        }

        Ok(watchers)
    }
}

#[cfg(test)]
#[path = "task_repo_impl_test.rs"]
mod tests;
