// Response shapes shared by commands and queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backend_domain::{CheckInOutcome, Event, GuestStats, Notification, Rsvp};

#[derive(Debug, Clone, Serialize)]
pub struct CheckInReport {
    pub outcome: CheckInOutcome,
    pub notification: Notification,
    /// Fresh counts after the attempt; absent when nothing reached the store
    /// or the refresh itself failed.
    pub stats: Option<GuestStats>,
}

impl CheckInReport {
    pub fn new(outcome: CheckInOutcome, stats: Option<GuestStats>) -> Self {
        let notification = outcome.notification();
        Self {
            outcome,
            notification,
            stats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuestRow {
    pub id: String,
    pub guest_name: String,
    pub num_guests: u32,
    pub status: &'static str,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<&Rsvp> for GuestRow {
    fn from(rsvp: &Rsvp) -> Self {
        Self {
            id: rsvp.id.clone(),
            guest_name: rsvp.guest_name.clone(),
            num_guests: rsvp.num_guests,
            status: rsvp.state().label(),
            guest_email: rsvp.guest_email.clone(),
            guest_phone: rsvp.guest_phone.clone(),
            checked_in_at: rsvp.checked_in_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInPage {
    pub event: Event,
    pub stats: GuestStats,
    pub guests: Vec<GuestRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanSessionInfo {
    pub session_id: String,
    pub event_id: String,
    pub event_name: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameResult {
    /// No code in the frame.
    Ignored,
    /// A check-in from this session is still in flight; the frame was dropped.
    Busy,
    Processed(CheckInReport),
}
