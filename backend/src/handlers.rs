//! Handler模块

use axum::{extract::State, Json};

use common::errors::AppError;
use common::response::{DataResponse, DatabaseStatus, ErrorBody, HealthResponse};

use crate::service::DatabaseService;
use crate::state::AppState;

/// 健康检查端点
///
/// Always answers 200; database trouble is reported in the `database` field.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = DatabaseService::new(state.connector);
    let database = DatabaseStatus::from(service.check().await);

    if let DatabaseStatus::Error(reason) = &database {
        tracing::warn!(reason = %reason, "health check could not reach database");
    }

    Json(HealthResponse::new(database))
}

/// 从数据库获取示例数据
#[utoipa::path(
    get,
    path = "/api/data",
    tag = "data",
    responses(
        (status = 200, description = "获取成功", body = DataResponse),
        (status = 500, description = "查询失败", body = ErrorBody),
        (status = 503, description = "数据库不可用", body = ErrorBody)
    )
)]
pub async fn get_data(State(state): State<AppState>) -> Result<Json<DataResponse>, AppError> {
    let service = DatabaseService::new(state.connector);
    let server_time = service.server_time().await?;
    Ok(Json(DataResponse::new(server_time)))
}
