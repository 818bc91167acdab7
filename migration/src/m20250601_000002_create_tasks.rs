use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tasks table
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text())
                    .col(ColumnDef::new(Tasks::Status).string().not_null())
                    .col(ColumnDef::new(Tasks::DueAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tasks::CustomDurationSeconds).big_integer())
                    .col(ColumnDef::new(Tasks::StartedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tasks::TimeSpentSeconds)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Tasks::EscalatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Tasks::EscalatedTo).uuid())
                    .col(ColumnDef::new(Tasks::AssignedTo).uuid())
                    .col(ColumnDef::new(Tasks::Department).string())
                    .col(ColumnDef::new(Tasks::ClosedApprovedBy).uuid())
                    .col(ColumnDef::new(Tasks::ClosedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 升级候选扫描按 (status, escalated_at) 过滤
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_status_escalated_at")
                    .table(Tasks::Table)
                    .col(Tasks::Status)
                    .col(Tasks::EscalatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_assigned_to")
                    .table(Tasks::Table)
                    .col(Tasks::AssignedTo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    DueAt,
    CustomDurationSeconds,
    StartedAt,
    TimeSpentSeconds,
    EscalatedAt,
    EscalatedTo,
    AssignedTo,
    Department,
    ClosedApprovedBy,
    ClosedAt,
    CreatedAt,
    UpdatedAt,
}
