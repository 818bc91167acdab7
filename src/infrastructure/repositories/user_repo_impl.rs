// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserRole};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::database::entities::user as user_entity;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 用户仓库实现
///
/// 基于SeaORM实现的用户数据访问层
#[derive(Clone)]
pub struct UserRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    /// 创建新的用户仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user_entity::Model> for User {
    fn from(model: user_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role.parse().unwrap_or_default(),
            department: model.department,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<User> for user_entity::ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            role: Set(user.role.to_string()),
            department: Set(user.department.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let model: user_entity::ActiveModel = user.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn first_supervisor(&self) -> Result<Option<User>, RepositoryError> {
        let roles: Vec<String> = UserRole::ESCALATION_TARGETS
            .iter()
            .map(ToString::to_string)
            .collect();

        // 按创建时间升序取第一个，选择是确定性的策略而非存储迭代顺序
        let model = user_entity::Entity::find()
            .filter(user_entity::Column::Role.is_in(roles))
            .order_by_asc(user_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn managers(&self) -> Result<Vec<User>, RepositoryError> {
        let models = user_entity::Entity::find()
            .filter(user_entity::Column::Role.eq(UserRole::Manager.to_string()))
            .order_by_asc(user_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
