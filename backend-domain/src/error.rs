use serde::Serialize;
use thiserror::Error;

/// Reasons a scan or manual check-in did not move a guest to checked-in.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckInError {
    #[error("scanned the event invitation QR instead of an entry ticket")]
    WrongQrType,
    #[error("payload is not a guest entry ticket")]
    InvalidTicketFormat,
    #[error("ticket doesn't match any RSVP")]
    GuestNotFound,
    #[error("ticket belongs to a different event")]
    WrongEvent,
    #[error("check-in failed: {reason}")]
    CheckInFailed { reason: String },
}

impl CheckInError {
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        CheckInError::CheckInFailed {
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CheckInError::WrongQrType => "wrong_qr_type",
            CheckInError::InvalidTicketFormat => "invalid_ticket_format",
            CheckInError::GuestNotFound => "guest_not_found",
            CheckInError::WrongEvent => "wrong_event",
            CheckInError::CheckInFailed { .. } => "check_in_failed",
        }
    }

    /// Transient failures can be retried by scanning again.
    pub fn is_transient(&self) -> bool {
        matches!(self, CheckInError::CheckInFailed { .. })
    }
}
