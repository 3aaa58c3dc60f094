// RSVP entity
// The one record the check-in flow mutates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::value_objects::{CheckInState, RsvpStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsvp {
    pub id: String,
    pub event_id: String,
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
    #[serde(default = "default_party_size", deserialize_with = "party_size")]
    pub num_guests: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checked_in: bool,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Rsvp {
    pub fn status(&self) -> RsvpStatus {
        RsvpStatus::from(self.status.as_str())
    }

    pub fn state(&self) -> CheckInState {
        CheckInState::from_columns(self.checked_in, self.checked_in_at)
    }

    pub fn belongs_to(&self, event_id: &str) -> bool {
        self.event_id == event_id
    }

    /// Case-insensitive on name and email, literal on phone.
    pub fn matches_search(&self, needle_lower: &str, needle_raw: &str) -> bool {
        if self.guest_name.to_lowercase().contains(needle_lower) {
            return true;
        }
        if let Some(email) = &self.guest_email {
            if email.to_lowercase().contains(needle_lower) {
                return true;
            }
        }
        self.guest_phone
            .as_deref()
            .map(|phone| phone.contains(needle_raw))
            .unwrap_or(false)
    }
}

fn default_party_size() -> u32 {
    1
}

fn party_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => default_party_size(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
