use super::{AckResponse, ApiError, ApiResult, AppState, CreatedResponse};
use crate::model::ThreadView;
use crate::replies::{AppendReplyInput, ReplyService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GetThreadParams {
    thread_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportReplyRequest {
    thread_id: String,
    reply_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteReplyRequest {
    thread_id: String,
    reply_id: String,
    delete_password: String,
}

pub(crate) async fn get_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Query(params): Query<GetThreadParams>,
) -> ApiResult<ThreadView> {
    let service = ReplyService::new(state.database.clone());
    let thread = service.get_thread(&board, &params.thread_id)?;
    Ok(Json(thread))
}

pub(crate) async fn create_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(input): Json<AppendReplyInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let service = ReplyService::new(state.database.clone());
    let id = service.append_reply(&board, input)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub(crate) async fn report_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(request): Json<ReportReplyRequest>,
) -> ApiResult<AckResponse> {
    let service = ReplyService::new(state.database.clone());
    service.report_reply(&board, &request.thread_id, &request.reply_id)?;
    Ok(Json(AckResponse::success()))
}

pub(crate) async fn delete_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(request): Json<DeleteReplyRequest>,
) -> ApiResult<AckResponse> {
    let service = ReplyService::new(state.database.clone());
    service.delete_reply(
        &board,
        &request.thread_id,
        &request.reply_id,
        &request.delete_password,
    )?;
    Ok(Json(AckResponse::success()))
}
