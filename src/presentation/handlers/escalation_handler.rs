// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::task_response::{EscalationResponseDto, SweepResponseDto};
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::escalation_service::{EscalationOutcome, EscalationService};
use crate::presentation::errors::AppError;
use crate::workers::escalation_worker::EscalationWorker;
use axum::{
    extract::{Extension, Path},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// 客户端触发的机会性升级
///
/// 交互客户端的本地倒计时发现逾期后调用；协议在执行时刻
/// 重新判定资格，认领被抢先时同样返回成功。
pub async fn trigger_escalation<T, U>(
    Extension(service): Extension<Arc<EscalationService<T, U>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EscalationResponseDto>, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let outcome = service.escalate(id, Utc::now()).await?;

    let outcome = match outcome {
        EscalationOutcome::Escalated { .. } => "escalated",
        EscalationOutcome::AlreadyEscalated => "already_escalated",
        EscalationOutcome::NotEligible => "not_eligible",
    };

    Ok(Json(EscalationResponseDto {
        outcome: outcome.to_string(),
    }))
}

/// 手动触发一轮扫描
///
/// 与后台工作器共享同一扫描实现，返回本轮成功升级的数量
pub async fn run_sweep<T, U>(
    Extension(worker): Extension<Arc<EscalationWorker<T, U>>>,
) -> Result<Json<SweepResponseDto>, AppError>
where
    T: TaskRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let escalated = worker.sweep(Utc::now()).await?;
    Ok(Json(SweepResponseDto { escalated }))
}
