// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::User;
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 用户仓库特质
///
/// 定义用户数据访问接口
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建新用户
    async fn create(&self, user: &User) -> Result<User, RepositoryError>;
    /// 根据ID查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 查找第一个可用的升级目标
    ///
    /// 按创建时间升序取第一个主管类角色用户。显式的确定性排序
    /// 是策略选择，不依赖存储层的迭代顺序。
    async fn first_supervisor(&self) -> Result<Option<User>, RepositoryError>;
    /// 查找全部经理角色用户
    async fn managers(&self) -> Result<Vec<User>, RepositoryError>;
}
