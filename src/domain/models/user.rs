// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 用户实体
///
/// 本核心只关心用户的角色与创建顺序：角色决定其是否可以
/// 接收升级或审批关闭，创建顺序决定升级目标的确定性选择。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 用户唯一标识符
    pub id: Uuid,
    /// 用户姓名
    pub name: String,
    /// 用户邮箱
    pub email: String,
    /// 用户角色
    pub role: UserRole,
    /// 所属部门
    pub department: Option<String>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 用户角色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// 普通销售人员
    #[default]
    Staff,
    /// 主管
    Supervisor,
    /// 部门负责人
    DepartmentHead,
    /// 管理员
    Admin,
    /// 经理，接收升级广播告警
    Manager,
}

impl UserRole {
    /// 可作为升级目标的角色集合
    ///
    /// 选择顺序不做角色分层偏好，仅按创建时间取第一个可用者。
    pub const ESCALATION_TARGETS: [UserRole; 3] = [
        UserRole::Supervisor,
        UserRole::DepartmentHead,
        UserRole::Admin,
    ];

    /// 判断该角色是否可以接收升级
    pub fn is_supervisory(&self) -> bool {
        matches!(
            self,
            UserRole::Supervisor | UserRole::DepartmentHead | UserRole::Admin
        )
    }

    /// 判断该角色是否具有关闭任务的审批权限
    pub fn can_approve_closure(&self) -> bool {
        self.is_supervisory() || matches!(self, UserRole::Manager)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserRole::Staff => write!(f, "staff"),
            UserRole::Supervisor => write!(f, "supervisor"),
            UserRole::DepartmentHead => write!(f, "department_head"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Manager => write!(f, "manager"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(UserRole::Staff),
            "supervisor" => Ok(UserRole::Supervisor),
            "department_head" => Ok(UserRole::DepartmentHead),
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            _ => Err(()),
        }
    }
}

impl User {
    /// 创建一个新的用户
    pub fn new(name: String, email: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            role,
            department: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}
