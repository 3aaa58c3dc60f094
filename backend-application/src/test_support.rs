// In-process fakes for the repository ports

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use backend_domain::{Event, EventRepository, Rsvp, RsvpRepository, RuntimeConfig};

use crate::AppState;

#[derive(Default)]
pub struct FakeStore {
    pub events: Mutex<Vec<Event>>,
    pub rsvps: Mutex<Vec<Rsvp>>,
    pub fail_reads: AtomicBool,
    pub fail_event_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub slow_writes: AtomicBool,
    /// Simulates another station checking the guest in between our read and write.
    pub concurrent_writer: AtomicBool,
    /// With `concurrent_writer`: the store goes away right after the other write.
    pub fail_reads_after_race: AtomicBool,
    pub writes: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with(events: Vec<Event>, rsvps: Vec<Rsvp>) -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(events),
            rsvps: Mutex::new(rsvps),
            ..Self::default()
        })
    }

    pub fn snapshot(&self) -> Vec<Rsvp> {
        self.rsvps.lock().expect("rsvps lock").clone()
    }

    pub fn rsvp(&self, id: &str) -> Option<Rsvp> {
        self.snapshot().into_iter().find(|rsvp| rsvp.id == id)
    }

    pub fn state(self: &Arc<Self>) -> AppState {
        AppState::new(RuntimeConfig::default(), self.clone(), self.clone())
    }
}

#[async_trait]
impl EventRepository for FakeStore {
    async fn find_event(
        &self,
        event_id: &str,
        owner_id: Option<&str>,
    ) -> anyhow::Result<Option<Event>> {
        if self.fail_event_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("store unreachable"));
        }
        let events = self.events.lock().expect("events lock");
        Ok(events
            .iter()
            .find(|event| event.id == event_id && owner_id.map_or(true, |o| event.is_owned_by(o)))
            .cloned())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl RsvpRepository for FakeStore {
    async fn find_rsvp(&self, rsvp_id: &str) -> anyhow::Result<Option<Rsvp>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("store unreachable"));
        }
        Ok(self.rsvp(rsvp_id))
    }

    async fn mark_checked_in(
        &self,
        rsvp_id: &str,
        event_id: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Rsvp>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("write rejected"));
        }
        if self.slow_writes.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let mut rsvps = self.rsvps.lock().expect("rsvps lock");
        let Some(row) = rsvps.iter_mut().find(|r| r.id == rsvp_id) else {
            return Ok(None);
        };
        if self.concurrent_writer.swap(false, Ordering::SeqCst) {
            row.checked_in = true;
            row.checked_in_at = Some(at - chrono::Duration::seconds(1));
            if self.fail_reads_after_race.load(Ordering::SeqCst) {
                self.fail_reads.store(true, Ordering::SeqCst);
            }
            return Ok(None);
        }
        if row.event_id != event_id || row.checked_in {
            return Ok(None);
        }
        row.checked_in = true;
        row.checked_in_at = Some(at);
        self.writes.lock().expect("writes lock").push(rsvp_id.to_string());
        Ok(Some(row.clone()))
    }

    async fn list_rsvps(&self, event_id: &str) -> anyhow::Result<Vec<Rsvp>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("store unreachable"));
        }
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|rsvp| rsvp.event_id == event_id)
            .collect())
    }
}

pub fn event(id: &str) -> Event {
    Event {
        id: id.to_string(),
        event_name: format!("Event {id}"),
        user_id: Some("host-1".to_string()),
    }
}

pub fn rsvp(id: &str, event_id: &str, status: &str, num_guests: u32) -> Rsvp {
    Rsvp {
        id: id.to_string(),
        event_id: event_id.to_string(),
        guest_name: format!("Guest {id}"),
        guest_email: Some(format!("{id}@example.com")),
        guest_phone: None,
        num_guests,
        status: status.to_string(),
        checked_in: false,
        checked_in_at: None,
        submitted_at: None,
    }
}
