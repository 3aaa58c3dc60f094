use chrono::Utc;
use tracing::{error, info, warn};

use crate::dtos::CheckInReport;
use crate::queries::guest_list_queries::{ensure_event, refresh_stats};
use crate::{AppError, AppState};
use backend_domain::{
    confirm, decode_ticket, evaluate, CheckInError, CheckInMutation, CheckInOutcome, Decision,
    ScanContext, TicketReference,
};

/// Scanner entry point: decode, look up, transition.
pub async fn check_in_scanned(
    state: &AppState,
    event_id: &str,
    text: &str,
) -> Result<CheckInReport, AppError> {
    let event = match ensure_event(state, event_id).await {
        Ok(event) => event,
        Err(AppError::Internal(err)) => {
            state.metrics.record_scan();
            return Ok(store_unavailable(state, event_id, err));
        }
        Err(err) => return Err(err),
    };
    state.metrics.record_scan();

    match decode_ticket(text) {
        Ok(ticket) => Ok(check_in_ticket(state, &event.id, &ticket).await),
        Err(err) => {
            warn!("rejected scan for event {}: {}", event.id, err);
            let outcome = CheckInOutcome::from(err);
            state.metrics.record_outcome(&outcome);
            Ok(CheckInReport::new(outcome, None))
        }
    }
}

/// Guest-list fallback for guests without a scannable ticket.
pub async fn check_in_guest(
    state: &AppState,
    event_id: &str,
    rsvp_id: &str,
) -> Result<CheckInReport, AppError> {
    let rsvp_id = rsvp_id.trim();
    if rsvp_id.is_empty() {
        return Err(AppError::BadRequest("rsvp_id is required".to_string()));
    }
    let event = match ensure_event(state, event_id).await {
        Ok(event) => event,
        Err(AppError::Internal(err)) => return Ok(store_unavailable(state, event_id, err)),
        Err(err) => return Err(err),
    };
    let ticket = TicketReference {
        rsvp_id: rsvp_id.to_string(),
    };
    Ok(check_in_ticket(state, &event.id, &ticket).await)
}

/// The event could not be loaded because the store failed; the operator
/// gets a retryable report instead of a server error.
fn store_unavailable(state: &AppState, event_id: &str, err: anyhow::Error) -> CheckInReport {
    error!("check-in for event {} aborted: {}", event_id, err);
    let outcome = CheckInOutcome::from(CheckInError::failed(err));
    state.metrics.record_outcome(&outcome);
    CheckInReport::new(outcome, None)
}

/// Runs the transition for a decoded ticket and refreshes the counts.
/// Every outcome, including store failures, comes back as a report.
pub async fn check_in_ticket(
    state: &AppState,
    event_id: &str,
    ticket: &TicketReference,
) -> CheckInReport {
    let ctx = ScanContext::new(event_id, Utc::now());

    // Detached so a dropped caller cannot cut the write off half-way.
    let task_state = state.clone();
    let rsvp_id = ticket.rsvp_id.clone();
    let task = tokio::spawn(async move { transition(&task_state, &ctx, &rsvp_id).await });
    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("check-in task for {} did not finish: {}", ticket.rsvp_id, err);
            CheckInError::failed(err).into()
        }
    };
    state.metrics.record_outcome(&outcome);

    match &outcome {
        CheckInOutcome::CheckedIn { guest_name, .. } => {
            info!("checked in {} ({}) for event {}", guest_name, ticket.rsvp_id, event_id);
        }
        CheckInOutcome::AlreadyCheckedIn { guest_name, .. } => {
            info!("{} ({}) was already checked in", guest_name, ticket.rsvp_id);
        }
        CheckInOutcome::Rejected(err) => {
            warn!("check-in of {} for event {} rejected: {}", ticket.rsvp_id, event_id, err);
        }
    }

    let stats = refresh_stats(state, event_id).await;
    CheckInReport::new(outcome, stats)
}

async fn transition(state: &AppState, ctx: &ScanContext, rsvp_id: &str) -> CheckInOutcome {
    let record = match state.rsvp_repo.find_rsvp(rsvp_id).await {
        Ok(record) => record,
        Err(err) => {
            error!("rsvp lookup for {} failed: {}", rsvp_id, err);
            return CheckInError::failed(err).into();
        }
    };

    match evaluate(record.as_ref(), ctx) {
        Decision::Settled(outcome) => outcome,
        Decision::Apply { mutation, .. } => apply(state, ctx, &mutation).await,
    }
}

async fn apply(state: &AppState, ctx: &ScanContext, mutation: &CheckInMutation) -> CheckInOutcome {
    let written = state
        .rsvp_repo
        .mark_checked_in(&mutation.rsvp_id, &mutation.event_id, mutation.checked_in_at)
        .await;

    match written {
        Ok(Some(updated)) => confirm(&updated, mutation),
        Ok(None) => {
            // Guard matched nothing: someone else got there first. The store decides.
            warn!(
                "conditional check-in of {} lost a race, re-reading",
                mutation.rsvp_id
            );
            match state.rsvp_repo.find_rsvp(&mutation.rsvp_id).await {
                Ok(record) => match evaluate(record.as_ref(), ctx) {
                    Decision::Settled(outcome) => outcome,
                    Decision::Apply { .. } => {
                        CheckInError::failed("store refused the update but row is still pending")
                            .into()
                    }
                },
                Err(err) => {
                    error!("re-read of {} failed: {}", mutation.rsvp_id, err);
                    CheckInError::failed(err).into()
                }
            }
        }
        Err(err) => {
            error!("check-in write for {} failed: {}", mutation.rsvp_id, err);
            CheckInError::failed(err).into()
        }
    }
}
