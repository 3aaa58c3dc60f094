use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::dtos::{CheckInPage, GuestListQuery};
use backend_application::queries::guest_list_queries;
use backend_application::AppState;
use backend_domain::GuestStats;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_check_in_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Query(query): Query<GuestListQuery>,
) -> Result<Json<CheckInPage>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let page = guest_list_queries::load_check_in_page(&state, &event_id, query).await?;
    Ok(Json(page))
}

pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<GuestStats>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let stats = guest_list_queries::event_stats(&state, &event_id).await?;
    Ok(Json(stats))
}
