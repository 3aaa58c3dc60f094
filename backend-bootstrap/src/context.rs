use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::AppState;
use backend_domain::{EventRepository, RsvpRepository, StoreConfig};
use backend_infrastructure::{AppConfig, MemoryStore, RestStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let (event_repo, rsvp_repo) = build_store(&config.to_store_config()).await?;
        event_repo.ping().await?;

        let state = AppState::new(runtime_config, event_repo, rsvp_repo);
        Ok(Self { state })
    }
}

async fn build_store(
    store: &StoreConfig,
) -> Result<(Arc<dyn EventRepository>, Arc<dyn RsvpRepository>)> {
    match store {
        StoreConfig::Memory { seed_path } => {
            let repo = match seed_path {
                Some(path) => Arc::new(MemoryStore::load(path).await?),
                None => {
                    info!("using an empty in-memory store");
                    Arc::new(MemoryStore::new())
                }
            };
            let event_repo: Arc<dyn EventRepository> = repo.clone();
            let rsvp_repo: Arc<dyn RsvpRepository> = repo;
            Ok((event_repo, rsvp_repo))
        }
        StoreConfig::Rest {
            base_url,
            api_key,
            request_timeout_seconds,
        } => {
            info!("using hosted datastore at {}", base_url);
            let repo = Arc::new(RestStore::new(base_url, api_key, *request_timeout_seconds)?);
            let event_repo: Arc<dyn EventRepository> = repo.clone();
            let rsvp_repo: Arc<dyn RsvpRepository> = repo;
            Ok((event_repo, rsvp_repo))
        }
    }
}
