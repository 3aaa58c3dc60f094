use tracing::{error, warn};

use crate::dtos::{CheckInPage, GuestListQuery, GuestRow};
use crate::{AppError, AppState};
use backend_domain::{guest_list, Event, GuestStats};

/// Owner-filtered event lookup; unknown and foreign events look the same.
pub async fn ensure_event(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    let event_id = event_id.trim();
    if event_id.is_empty() {
        return Err(AppError::BadRequest("event_id is required".to_string()));
    }
    state
        .event_repo
        .find_event(event_id, state.config.host_user_id.as_deref())
        .await
        .map_err(|err| {
            error!("failed to fetch event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .ok_or_else(AppError::event_not_found)
}

pub async fn load_check_in_page(
    state: &AppState,
    event_id: &str,
    query: GuestListQuery,
) -> Result<CheckInPage, AppError> {
    let event = ensure_event(state, event_id).await?;
    let rsvps = state.rsvp_repo.list_rsvps(&event.id).await.map_err(|err| {
        error!("failed to fetch rsvps for {}: {}", event.id, err);
        AppError::Internal(err)
    })?;

    let stats = GuestStats::from_rsvps(&rsvps);
    let search = query.search.unwrap_or_default();
    let guests = guest_list(&rsvps, &search)
        .into_iter()
        .map(GuestRow::from)
        .collect();

    Ok(CheckInPage {
        event,
        stats,
        guests,
    })
}

pub async fn event_stats(state: &AppState, event_id: &str) -> Result<GuestStats, AppError> {
    let event = ensure_event(state, event_id).await?;
    let rsvps = state
        .rsvp_repo
        .list_rsvps(&event.id)
        .await
        .map_err(AppError::Internal)?;
    Ok(GuestStats::from_rsvps(&rsvps))
}

/// Full re-fetch after a check-in attempt. A failed refresh is not the
/// attempt's failure, so it only logs.
pub async fn refresh_stats(state: &AppState, event_id: &str) -> Option<GuestStats> {
    match state.rsvp_repo.list_rsvps(event_id).await {
        Ok(rsvps) => Some(GuestStats::from_rsvps(&rsvps)),
        Err(err) => {
            warn!("stats refresh for {} failed: {}", event_id, err);
            None
        }
    }
}
