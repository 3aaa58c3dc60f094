use serde_json::Value;

use crate::entities::{ScanFrame, TicketReference};
use crate::error::CheckInError;

/// Substrings that mark the public event-invitation QR rather than a guest ticket.
const INVITE_MARKERS: [&str; 3] = ["http", "/event/", "dewana"];

const RSVP_ID_FIELD: &str = "rsvpId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDecision {
    /// Nothing was detected in the frame; dropped without telling the operator.
    Ignored,
    Decoded(TicketReference),
    Rejected(CheckInError),
}

pub fn classify_frame(frame: &ScanFrame) -> FrameDecision {
    let Some(text) = frame.text.as_deref() else {
        return FrameDecision::Ignored;
    };
    if text.trim().is_empty() {
        return FrameDecision::Ignored;
    }
    match decode_ticket(text) {
        Ok(ticket) => FrameDecision::Decoded(ticket),
        Err(err) => FrameDecision::Rejected(err),
    }
}

pub fn decode_ticket(text: &str) -> Result<TicketReference, CheckInError> {
    let trimmed = text.trim();
    if is_invitation_link(trimmed) {
        return Err(CheckInError::WrongQrType);
    }

    let payload: Value =
        serde_json::from_str(trimmed).map_err(|_| CheckInError::InvalidTicketFormat)?;
    let rsvp_id = payload
        .get(RSVP_ID_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(CheckInError::InvalidTicketFormat)?;

    Ok(TicketReference {
        rsvp_id: rsvp_id.to_string(),
    })
}

fn is_invitation_link(text: &str) -> bool {
    let lowered = text.to_lowercase();
    INVITE_MARKERS.iter().any(|marker| lowered.contains(marker))
}
