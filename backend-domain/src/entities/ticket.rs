// Scanner input and the ticket reference decoded from it

use serde::{Deserialize, Serialize};

/// Identifier extracted from a guest's personal entry QR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReference {
    pub rsvp_id: String,
}

/// One callback from the camera loop. `text` is absent when no code was found in the frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanFrame {
    #[serde(default)]
    pub text: Option<String>,
}

impl ScanFrame {
    pub fn decoded(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
