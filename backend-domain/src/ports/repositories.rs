use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Event, Rsvp};

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Point lookup by id, narrowed to `owner_id` when one is given.
    async fn find_event(
        &self,
        event_id: &str,
        owner_id: Option<&str>,
    ) -> anyhow::Result<Option<Event>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RsvpRepository: Send + Sync {
    async fn find_rsvp(&self, rsvp_id: &str) -> anyhow::Result<Option<Rsvp>>;

    /// Sets `checked_in` and `checked_in_at` only if the row belongs to
    /// `event_id` and is not checked in yet. Returns the updated row, or
    /// `None` when the guard matched nothing.
    async fn mark_checked_in(
        &self,
        rsvp_id: &str,
        event_id: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Rsvp>>;

    /// All RSVPs of an event, newest submission first.
    async fn list_rsvps(&self, event_id: &str) -> anyhow::Result<Vec<Rsvp>>;
}
