use std::sync::Arc;

use backend_domain::ports::{EventRepository, RsvpRepository};
use backend_domain::RuntimeConfig;

use crate::{Metrics, ScanSessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub rsvp_repo: Arc<dyn RsvpRepository>,
    pub metrics: Arc<Metrics>,
    pub scan_sessions: Arc<ScanSessionRegistry>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        event_repo: Arc<dyn EventRepository>,
        rsvp_repo: Arc<dyn RsvpRepository>,
    ) -> Self {
        Self {
            config,
            event_repo,
            rsvp_repo,
            metrics: Arc::new(Metrics::default()),
            scan_sessions: Arc::new(ScanSessionRegistry::default()),
        }
    }
}
