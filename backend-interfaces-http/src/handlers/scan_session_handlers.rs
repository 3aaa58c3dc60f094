use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::scan_session_commands;
use backend_application::dtos::{FrameResult, ScanSessionInfo};
use backend_application::AppState;
use backend_domain::ScanFrame;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<(StatusCode, Json<ScanSessionInfo>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let info = scan_session_commands::start_scan_session(&state, &event_id).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

pub async fn submit_frame(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(frame): Json<ScanFrame>,
) -> Result<Json<FrameResult>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let result = scan_session_commands::submit_frame(&state, &session_id, frame).await?;
    Ok(Json(result))
}

pub async fn stop_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    scan_session_commands::stop_scan_session(&state, &session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
