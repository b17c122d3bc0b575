use super::{AckResponse, ApiError, ApiResult, AppState, CreatedResponse};
use crate::boards::{BoardService, CreateThreadInput};
use crate::model::ThreadView;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    api_port: u16,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportThreadRequest {
    thread_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteThreadRequest {
    thread_id: String,
    delete_password: String,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_port: state.config.api_port,
    })
}

pub(crate) async fn list_threads(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> ApiResult<Vec<ThreadView>> {
    let service = BoardService::new(state.database.clone());
    let threads = service.list_threads(&board)?;
    Ok(Json(threads))
}

pub(crate) async fn create_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(input): Json<CreateThreadInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let service = BoardService::new(state.database.clone());
    let id = service.create_thread(&board, input)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub(crate) async fn report_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(request): Json<ReportThreadRequest>,
) -> ApiResult<AckResponse> {
    let service = BoardService::new(state.database.clone());
    service.report_thread(&board, &request.thread_id)?;
    Ok(Json(AckResponse::success()))
}

pub(crate) async fn delete_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(request): Json<DeleteThreadRequest>,
) -> ApiResult<AckResponse> {
    let service = BoardService::new(state.database.clone());
    service.delete_thread(&board, &request.thread_id, &request.delete_password)?;
    Ok(Json(AckResponse::success()))
}
