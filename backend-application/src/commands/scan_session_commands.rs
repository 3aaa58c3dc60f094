use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::commands::check_in_commands::check_in_ticket;
use crate::dtos::{CheckInReport, FrameResult, ScanSessionInfo};
use crate::queries::guest_list_queries::ensure_event;
use crate::{AppError, AppState, ScanSession};
use backend_domain::{classify_frame, CheckInOutcome, FrameDecision, ScanFrame};

pub async fn start_scan_session(
    state: &AppState,
    event_id: &str,
) -> Result<ScanSessionInfo, AppError> {
    let event = ensure_event(state, event_id).await?;
    let session = state
        .scan_sessions
        .open(event.id.clone(), event.event_name.clone())
        .await;
    info!("scan session {} started for event {}", session.id, event.id);
    Ok(info_for(&session))
}

pub async fn submit_frame(
    state: &AppState,
    session_id: &str,
    frame: ScanFrame,
) -> Result<FrameResult, AppError> {
    let id = parse_session_id(session_id)?;
    let session = state
        .scan_sessions
        .get(&id)
        .await
        .ok_or_else(AppError::session_not_found)?;

    match classify_frame(&frame) {
        FrameDecision::Ignored => {
            state.metrics.record_ignored_frame();
            Ok(FrameResult::Ignored)
        }
        FrameDecision::Rejected(err) => {
            state.metrics.record_scan();
            warn!("session {} rejected frame: {}", session.id, err);
            let outcome = CheckInOutcome::from(err);
            state.metrics.record_outcome(&outcome);
            Ok(FrameResult::Processed(CheckInReport::new(outcome, None)))
        }
        FrameDecision::Decoded(ticket) => {
            let Some(_guard) = session.try_begin() else {
                debug!("session {} busy, dropping frame for {}", session.id, ticket.rsvp_id);
                return Ok(FrameResult::Busy);
            };
            state.metrics.record_scan();
            let report = check_in_ticket(state, &session.event_id, &ticket).await;
            Ok(FrameResult::Processed(report))
        }
    }
}

pub async fn stop_scan_session(state: &AppState, session_id: &str) -> Result<(), AppError> {
    let id = parse_session_id(session_id)?;
    let session = state
        .scan_sessions
        .close(&id)
        .await
        .ok_or_else(AppError::session_not_found)?;
    if session.is_busy() {
        info!("scan session {} stopped with a check-in still in flight", session.id);
    } else {
        info!("scan session {} stopped", session.id);
    }
    Ok(())
}

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("invalid session id '{}'", raw.trim())))
}

fn info_for(session: &ScanSession) -> ScanSessionInfo {
    ScanSessionInfo {
        session_id: session.id.to_string(),
        event_id: session.event_id.clone(),
        event_name: session.event_name.clone(),
        started_at: session.started_at,
    }
}
