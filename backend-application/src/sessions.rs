use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One operator's scanner, bound to a single event for its whole life.
#[derive(Debug)]
pub struct ScanSession {
    pub id: Uuid,
    pub event_id: String,
    pub event_name: String,
    pub started_at: DateTime<Utc>,
    in_flight: AtomicBool,
}

impl ScanSession {
    fn new(event_id: String, event_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            event_name,
            started_at: Utc::now(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claims the session for one check-in. `None` while another is outstanding.
    pub fn try_begin(self: &Arc<Self>) -> Option<InFlightGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                session: Arc::clone(self),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Released on drop, on every exit path of the check-in.
#[derive(Debug)]
pub struct InFlightGuard {
    session: Arc<ScanSession>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct ScanSessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<ScanSession>>>,
}

impl ScanSessionRegistry {
    pub async fn open(&self, event_id: String, event_name: String) -> Arc<ScanSession> {
        let session = Arc::new(ScanSession::new(event_id, event_name));
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<ScanSession>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Removes the session. Work it already started keeps its own `Arc` and finishes.
    pub async fn close(&self, id: &Uuid) -> Option<Arc<ScanSession>> {
        self.sessions.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
