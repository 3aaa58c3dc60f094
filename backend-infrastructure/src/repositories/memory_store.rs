use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

use backend_domain::{Event, EventRepository, Rsvp, RsvpRepository};

#[derive(Debug, Default, Deserialize)]
pub struct StoreSeed {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
}

/// Process-local stand-in for the hosted datastore. The conditional update
/// runs under the write lock, so it is atomic like the real one.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<String, Event>>,
    rsvps: RwLock<HashMap<String, Rsvp>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        let events = seed
            .events
            .into_iter()
            .map(|event| (event.id.clone(), event))
            .collect();
        let rsvps = seed
            .rsvps
            .into_iter()
            .map(|rsvp| (rsvp.id.clone(), rsvp))
            .collect();
        Self {
            events: RwLock::new(events),
            rsvps: RwLock::new(rsvps),
        }
    }

    pub fn parse_seed(content: &str) -> Result<StoreSeed> {
        serde_yaml::from_str(content).map_err(|err| anyhow!("invalid seed file: {}", err))
    }

    pub async fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(anyhow!("seed file {} not found", path));
        }
        let content = fs::read_to_string(path).await?;
        let seed = Self::parse_seed(&content)?;
        info!(
            "seeded memory store from {} ({} events, {} rsvps)",
            path,
            seed.events.len(),
            seed.rsvps.len()
        );
        Ok(Self::from_seed(seed))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_event(&self, event_id: &str, owner_id: Option<&str>) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events
            .get(event_id)
            .filter(|event| owner_id.map_or(true, |owner| event.is_owned_by(owner)))
            .cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl RsvpRepository for MemoryStore {
    async fn find_rsvp(&self, rsvp_id: &str) -> Result<Option<Rsvp>> {
        Ok(self.rsvps.read().await.get(rsvp_id).cloned())
    }

    async fn mark_checked_in(
        &self,
        rsvp_id: &str,
        event_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Rsvp>> {
        let mut rsvps = self.rsvps.write().await;
        let Some(row) = rsvps.get_mut(rsvp_id) else {
            return Ok(None);
        };
        if row.event_id != event_id || row.checked_in {
            return Ok(None);
        }
        row.checked_in = true;
        row.checked_in_at = Some(at);
        Ok(Some(row.clone()))
    }

    async fn list_rsvps(&self, event_id: &str) -> Result<Vec<Rsvp>> {
        let rsvps = self.rsvps.read().await;
        let mut list = rsvps
            .values()
            .filter(|rsvp| rsvp.event_id == event_id)
            .cloned()
            .collect::<Vec<_>>();
        // Newest first; rows without a submission time sink to the end.
        list.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
events:
  - id: e1
    event_name: Walima Dinner
    user_id: host-1
rsvps:
  - id: r1
    event_id: e1
    guest_name: Amina
    num_guests: 2
    status: "yes"
    submitted_at: "2025-03-01T10:00:00Z"
  - id: r2
    event_id: e1
    guest_name: Bilal
    num_guests: 3
    status: "yes"
    submitted_at: "2025-03-02T10:00:00Z"
  - id: r3
    event_id: e2
    guest_name: Chen
    status: "no"
"#;

    fn store() -> MemoryStore {
        MemoryStore::from_seed(MemoryStore::parse_seed(SEED).expect("seed"))
    }

    #[tokio::test]
    async fn event_lookup_honours_owner_filter() {
        let store = store();
        assert!(store.find_event("e1", None).await.expect("lookup").is_some());
        assert!(store.find_event("e1", Some("host-1")).await.expect("lookup").is_some());
        assert!(store.find_event("e1", Some("host-2")).await.expect("lookup").is_none());
        assert!(store.find_event("e9", None).await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn conditional_update_applies_once() {
        let store = store();
        let at = Utc::now();

        let updated = store
            .mark_checked_in("r1", "e1", at)
            .await
            .expect("update")
            .expect("row updated");
        assert!(updated.checked_in);
        assert_eq!(updated.checked_in_at, Some(at));

        let later = at + chrono::Duration::seconds(5);
        assert!(store.mark_checked_in("r1", "e1", later).await.expect("update").is_none());
        let row = store.find_rsvp("r1").await.expect("find").expect("row");
        assert_eq!(row.checked_in_at, Some(at));
    }

    #[tokio::test]
    async fn conditional_update_refuses_other_event_and_missing_rows() {
        let store = store();
        assert!(store.mark_checked_in("r3", "e1", Utc::now()).await.expect("update").is_none());
        assert!(store.mark_checked_in("zz", "e1", Utc::now()).await.expect("update").is_none());
        assert!(!store.find_rsvp("r3").await.expect("find").expect("row").checked_in);
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let store = store();
        let list = store.list_rsvps("e1").await.expect("list");
        let ids = list.iter().map(|rsvp| rsvp.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[tokio::test]
    async fn missing_seed_file_is_an_error() {
        assert!(MemoryStore::load("/definitely/not/here.yaml").await.is_err());
    }
}
