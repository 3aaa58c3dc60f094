// RSVP status value object

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
    Unknown,
}

impl RsvpStatus {
    /// Only attending guests count toward the expected headcount.
    pub fn is_attending(&self) -> bool {
        matches!(self, RsvpStatus::Yes)
    }
}

impl From<&str> for RsvpStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "yes" => RsvpStatus::Yes,
            "no" => RsvpStatus::No,
            "maybe" => RsvpStatus::Maybe,
            _ => RsvpStatus::Unknown,
        }
    }
}
