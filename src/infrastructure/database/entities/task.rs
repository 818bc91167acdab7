// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_at: Option<ChronoDateTimeWithTimeZone>,
    pub custom_duration_seconds: Option<i64>,
    pub started_at: Option<ChronoDateTimeWithTimeZone>,
    pub time_spent_seconds: i64,
    pub escalated_at: Option<ChronoDateTimeWithTimeZone>,
    pub escalated_to: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub department: Option<String>,
    pub closed_approved_by: Option<Uuid>,
    pub closed_at: Option<ChronoDateTimeWithTimeZone>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
