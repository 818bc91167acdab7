// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::presentation::handlers::{escalation_handler, task_handler};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let task_routes = Router::new()
        .route(
            "/v1/tasks",
            post(task_handler::create_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}",
            get(task_handler::get_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}/start",
            post(task_handler::start_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}/pause",
            post(task_handler::pause_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}/close",
            post(task_handler::close_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}/assignees",
            post(task_handler::assign_task::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/tasks/{id}/escalate",
            post(escalation_handler::trigger_escalation::<TaskRepositoryImpl, UserRepositoryImpl>),
        )
        .route(
            "/v1/escalations/sweep",
            post(escalation_handler::run_sweep::<TaskRepositoryImpl, UserRepositoryImpl>),
        );

    Router::new().merge(public_routes).merge(task_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
