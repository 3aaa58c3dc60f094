// Check-in state value object

use chrono::{DateTime, Utc};

/// `Pending` is initial, `CheckedIn` is terminal: nothing here moves a guest back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInState {
    Pending,
    CheckedIn { at: Option<DateTime<Utc>> },
}

impl CheckInState {
    pub fn from_columns(checked_in: bool, checked_in_at: Option<DateTime<Utc>>) -> Self {
        if checked_in {
            CheckInState::CheckedIn { at: checked_in_at }
        } else {
            CheckInState::Pending
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckInState::Pending => "Pending",
            CheckInState::CheckedIn { .. } => "Checked In",
        }
    }
}
