// Event entity
// Scope of a check-in session; read-only here

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Event {
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.user_id.as_deref() == Some(owner_id)
    }
}
