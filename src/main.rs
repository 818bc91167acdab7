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

use axum::Extension;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use migration::{Migrator, MigratorTrait};
use tasksla::config::settings::Settings;
use tasksla::domain::services::escalation_service::EscalationService;
use tasksla::domain::services::notification_service::NotificationDispatcher;
use tasksla::domain::services::task_timer_service::TaskTimerService;
use tasksla::infrastructure::database::connection;
use tasksla::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use tasksla::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use tasksla::infrastructure::services::push_dispatcher::PushDispatcher;
use tasksla::presentation::routes;
use tasksla::utils::telemetry;
use tasksla::workers::escalation_worker::EscalationWorker;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting tasksla...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    tasksla::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let task_repo = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let user_repo = Arc::new(UserRepositoryImpl::new(db.clone()));
    let dispatcher: Arc<dyn NotificationDispatcher> =
        Arc::new(PushDispatcher::new(&settings.notification));

    let timer_service = Arc::new(TaskTimerService::new(
        task_repo.clone(),
        user_repo.clone(),
        dispatcher.clone(),
    ));
    let escalation_service = Arc::new(EscalationService::new(
        task_repo.clone(),
        user_repo.clone(),
        dispatcher.clone(),
    ));

    // 5. Start escalation sweep worker
    let worker = Arc::new(EscalationWorker::new(
        task_repo.clone(),
        escalation_service.clone(),
        Duration::from_secs(settings.sweeper.interval_secs),
    ));
    if settings.sweeper.enabled {
        worker.start();
        info!(
            "Escalation sweep worker scheduled every {}s",
            settings.sweeper.interval_secs
        );
    }

    // 6. Start HTTP server
    let app = routes::routes()
        .layer(Extension(timer_service))
        .layer(Extension(escalation_service))
        .layer(Extension(worker))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
