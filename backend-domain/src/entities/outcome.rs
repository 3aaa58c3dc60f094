// What the operator sees after a scan or a manual check-in

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CheckInError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckInOutcome {
    CheckedIn {
        rsvp_id: String,
        guest_name: String,
        checked_in_at: DateTime<Utc>,
    },
    AlreadyCheckedIn {
        rsvp_id: String,
        guest_name: String,
        checked_in_at: Option<DateTime<Utc>>,
    },
    Rejected(CheckInError),
}

impl CheckInOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckInOutcome::CheckedIn { .. } => "checked_in",
            CheckInOutcome::AlreadyCheckedIn { .. } => "already_checked_in",
            CheckInOutcome::Rejected(err) => err.kind(),
        }
    }

    pub fn is_checked_in(&self) -> bool {
        matches!(self, CheckInOutcome::CheckedIn { .. })
    }

    pub fn notification(&self) -> Notification {
        match self {
            CheckInOutcome::CheckedIn { guest_name, .. } => Notification::info(
                self.kind(),
                "Guest Checked In!",
                format!("{guest_name} has been successfully checked in."),
            ),
            CheckInOutcome::AlreadyCheckedIn { guest_name, .. } => Notification::info(
                self.kind(),
                "Already Checked In",
                format!("{guest_name} has already been checked in."),
            ),
            CheckInOutcome::Rejected(err) => Notification::from(err),
        }
    }
}

impl From<CheckInError> for CheckInOutcome {
    fn from(err: CheckInError) -> Self {
        CheckInOutcome::Rejected(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notification {
    fn info(kind: &'static str, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            destructive: false,
        }
    }

    fn destructive(kind: &'static str, title: &str, description: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            destructive: true,
        }
    }
}

impl From<&CheckInError> for Notification {
    fn from(err: &CheckInError) -> Self {
        match err {
            CheckInError::WrongQrType => Notification::destructive(
                err.kind(),
                "Wrong QR Code Type",
                "This is the Event Invitation QR. Please ask the guest to show their 'Entry Ticket' QR code that they received after RSVP.",
            ),
            CheckInError::InvalidTicketFormat => Notification::destructive(
                err.kind(),
                "Invalid Ticket",
                "This QR code is not a valid guest entry ticket. Make sure the guest downloads their ticket after RSVP.",
            ),
            CheckInError::GuestNotFound => Notification::destructive(
                err.kind(),
                "Guest Not Found",
                "This ticket doesn't match any RSVP. The guest may not have registered or the QR code is invalid.",
            ),
            CheckInError::WrongEvent => Notification::destructive(
                err.kind(),
                "Wrong Event",
                "This ticket is for a different event. Please use the correct check-in page.",
            ),
            CheckInError::CheckInFailed { .. } => Notification::destructive(
                err.kind(),
                "Error",
                "Failed to check in guest. Please try again.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_has_a_distinct_notification() {
        let at = Utc::now();
        let outcomes = vec![
            CheckInOutcome::CheckedIn {
                rsvp_id: "r1".to_string(),
                guest_name: "Amina".to_string(),
                checked_in_at: at,
            },
            CheckInOutcome::AlreadyCheckedIn {
                rsvp_id: "r1".to_string(),
                guest_name: "Amina".to_string(),
                checked_in_at: Some(at),
            },
            CheckInError::WrongQrType.into(),
            CheckInError::InvalidTicketFormat.into(),
            CheckInError::GuestNotFound.into(),
            CheckInError::WrongEvent.into(),
            CheckInError::failed("timeout").into(),
        ];
        let mut titles = outcomes
            .iter()
            .map(|outcome| outcome.notification().title)
            .collect::<Vec<_>>();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), outcomes.len());
    }

    #[test]
    fn already_checked_in_is_not_destructive() {
        let outcome = CheckInOutcome::AlreadyCheckedIn {
            rsvp_id: "r1".to_string(),
            guest_name: "Amina".to_string(),
            checked_in_at: None,
        };
        let notification = outcome.notification();
        assert!(!notification.destructive);
        assert_eq!(notification.description, "Amina has already been checked in.");
    }

    #[test]
    fn rejected_outcome_serializes_with_kind() {
        let outcome: CheckInOutcome = CheckInError::WrongEvent.into();
        let value = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(value["outcome"], "rejected");
        assert_eq!(value["kind"], "wrong_event");
    }
}
