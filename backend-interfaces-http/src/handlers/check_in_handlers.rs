use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::check_in_commands;
use backend_application::dtos::CheckInReport;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Deserialize)]
pub struct ScanPayload {
    pub text: String,
}

pub async fn scan_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(payload): Json<ScanPayload>,
) -> Result<Json<CheckInReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let report = check_in_commands::check_in_scanned(&state, &event_id, &payload.text).await?;
    Ok(Json(report))
}

pub async fn check_in_guest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((event_id, rsvp_id)): Path<(String, String)>,
) -> Result<Json<CheckInReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let report = check_in_commands::check_in_guest(&state, &event_id, &rsvp_id).await?;
    Ok(Json(report))
}
