// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::task_request::{
    AssignRequestDto, CreateTaskRequestDto, TransitionRequestDto,
};
use crate::application::dto::task_response::TaskResponseDto;
use crate::domain::models::task::Task;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::task_timer_service::TaskTimerService;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 创建任务
///
/// # 参数
///
/// * `service` - 任务计时服务
/// * `request` - 创建任务请求
///
/// # 返回值
///
/// 返回带倒计时快照的任务
pub async fn create_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Json(request): Json<CreateTaskRequestDto>,
) -> Result<(StatusCode, Json<TaskResponseDto>), AppError> {
    request.validate().map_err(anyhow::Error::from)?;

    let mut task = Task::new(request.title, request.description, request.assigned_to);
    task.due_at = request.due_at;
    task.custom_duration_seconds = request.custom_duration_seconds;
    task.department = request.department;

    let created = service.create(task).await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskResponseDto::from_task(created, Utc::now())),
    ))
}

/// 查询任务
///
/// 倒计时快照按请求时刻计算，客户端可以任意节奏轮询而不改变契约
pub async fn get_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponseDto>, AppError> {
    let task = service.get(id).await?;
    Ok(Json(TaskResponseDto::from_task(task, Utc::now())))
}

/// 启动任务计时器
pub async fn start_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Path(id): Path<Uuid>,
    Json(_request): Json<TransitionRequestDto>,
) -> Result<Json<TaskResponseDto>, AppError> {
    let task = service.start(id, Utc::now()).await?;
    Ok(Json(TaskResponseDto::from_task(task, Utc::now())))
}

/// 暂停任务计时器
pub async fn pause_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Path(id): Path<Uuid>,
    Json(_request): Json<TransitionRequestDto>,
) -> Result<Json<TaskResponseDto>, AppError> {
    let task = service.pause(id, Utc::now()).await?;
    Ok(Json(TaskResponseDto::from_task(task, Utc::now())))
}

/// 关闭任务
///
/// 发起人必须具有审批权限，否则以409拒绝
pub async fn close_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequestDto>,
) -> Result<Json<TaskResponseDto>, AppError> {
    let task = service.close(id, request.actor, Utc::now()).await?;
    Ok(Json(TaskResponseDto::from_task(task, Utc::now())))
}

/// 添加团队协作人
pub async fn assign_task<T: TaskRepository, U: UserRepository>(
    Extension(service): Extension<Arc<TaskTimerService<T, U>>>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignRequestDto>,
) -> Result<StatusCode, AppError> {
    service.assign(id, request.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
