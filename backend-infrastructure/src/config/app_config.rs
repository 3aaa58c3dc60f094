use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{RuntimeConfig, StoreConfig};

use crate::config::validation::{validate_store_backend, validate_store_url};
use crate::utils::{blank_to_none, resolve_path};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub host_user_id: Option<String>,
    pub store_backend: String,
    pub store_url: String,
    pub store_api_key: Option<String>,
    pub seed_path: Option<String>,
    pub log_dir: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            host_user_id: None,
            store_backend: "memory".to_string(),
            store_url: String::new(),
            store_api_key: None,
            seed_path: None,
            log_dir: None,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("DEWANA_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("{} not found, using defaults", path);
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.finish(base_dir)?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        config.finish(base_dir)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    fn finish(&mut self, base_dir: Option<&Path>) -> Result<()> {
        self.resolve_paths(base_dir);
        self.normalize();
        self.validate()
    }

    pub fn normalize(&mut self) {
        self.api_token = blank_to_none(self.api_token.take());
        self.host_user_id = blank_to_none(self.host_user_id.take());
        self.store_api_key = blank_to_none(self.store_api_key.take());
        self.seed_path = blank_to_none(self.seed_path.take());
        self.log_dir = blank_to_none(self.log_dir.take());
        self.store_backend = self.store_backend.trim().to_lowercase();
        self.store_url = self.store_url.trim().trim_end_matches('/').to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(seed) = &self.seed_path {
            self.seed_path = Some(resolve_path(base, seed));
        }
        if let Some(dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_store_backend(&self.store_backend)?;
        if self.store_backend == "rest" {
            validate_store_url(&self.store_url)?;
            if self.store_api_key.is_none() {
                return Err(anyhow!("store_api_key is required for the rest backend"));
            }
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    /// The command-line directory wins over the configured one.
    pub fn effective_log_dir(&self, cli_log_dir: Option<&str>) -> Option<String> {
        blank_to_none(cli_log_dir.map(str::to_string)).or_else(|| self.log_dir.clone())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            host_user_id: self.host_user_id.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_store_config(&self) -> StoreConfig {
        if self.store_backend == "rest" {
            StoreConfig::Rest {
                base_url: self.store_url.clone(),
                api_key: self.store_api_key.clone().unwrap_or_default(),
                request_timeout_seconds: self.request_timeout_seconds,
            }
        } else {
            StoreConfig::Memory {
                seed_path: self.seed_path.clone(),
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("DEWANA_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("DEWANA_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("DEWANA_HOST_USER_ID") {
            self.host_user_id = Some(value);
        }
        if let Ok(value) = env::var("DEWANA_STORE_BACKEND") {
            self.store_backend = value;
        }
        if let Ok(value) = env::var("DEWANA_STORE_URL") {
            self.store_url = value;
        }
        if let Ok(value) = env::var("DEWANA_STORE_API_KEY") {
            self.store_api_key = Some(value);
        }
        if let Ok(value) = env::var("DEWANA_SEED_PATH") {
            self.seed_path = Some(value);
        }
        if let Ok(value) = env::var("DEWANA_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("DEWANA_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("DEWANA_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_memory_store() {
        let config = AppConfig::default();
        config.validate().expect("defaults are valid");
        assert_eq!(config.to_store_config(), StoreConfig::Memory { seed_path: None });
    }

    #[test]
    fn rest_backend_needs_url_and_key() {
        let mut config = AppConfig::from_toml(
            r#"
            store_backend = " REST "
            store_url = "https://project.example.co/"
            store_api_key = "  "
            "#,
        )
        .expect("parse");
        config.normalize();
        assert_eq!(config.store_backend, "rest");
        assert_eq!(config.store_url, "https://project.example.co");
        assert!(config.store_api_key.is_none());
        assert!(config.validate().is_err());

        config.store_api_key = Some("anon-key".to_string());
        config.validate().expect("valid rest config");
        assert_eq!(
            config.to_store_config(),
            StoreConfig::Rest {
                base_url: "https://project.example.co".to_string(),
                api_key: "anon-key".to_string(),
                request_timeout_seconds: 15,
            }
        );
    }

    #[test]
    fn blank_optionals_become_none_and_seed_resolves() {
        let mut config = AppConfig::from_toml(
            r#"
            api_token = ""
            host_user_id = " host-1 "
            seed_path = "seed.yaml"
            "#,
        )
        .expect("parse");
        config.resolve_paths(Some(Path::new("/etc/dewana")));
        config.normalize();
        assert!(config.api_token.is_none());
        assert_eq!(config.host_user_id.as_deref(), Some("host-1"));
        assert_eq!(config.seed_path.as_deref(), Some("/etc/dewana/seed.yaml"));
    }

    #[test]
    fn rejects_unknown_backend_and_bad_bind_addr() {
        let mut config = AppConfig {
            store_backend: "sqlite".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
        config.store_backend = "memory".to_string();
        config.bind_addr = "nowhere".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn log_dir_comes_from_file_env_or_cli() {
        let mut config = AppConfig::from_toml(r#"log_dir = "logs""#).expect("parse");
        config.resolve_paths(Some(Path::new("/var/lib/dewana")));
        config.normalize();
        assert_eq!(config.log_dir.as_deref(), Some("/var/lib/dewana/logs"));
        assert_eq!(
            config.effective_log_dir(None).as_deref(),
            Some("/var/lib/dewana/logs")
        );
        assert_eq!(
            config.effective_log_dir(Some("/tmp/door")).as_deref(),
            Some("/tmp/door")
        );
        assert_eq!(
            config.effective_log_dir(Some("  ")).as_deref(),
            Some("/var/lib/dewana/logs")
        );

        env::set_var("DEWANA_LOG_DIR", "  ");
        config.apply_env_overrides();
        env::remove_var("DEWANA_LOG_DIR");
        config.normalize();
        assert!(config.log_dir.is_none());
        assert!(config.effective_log_dir(None).is_none());
    }
}
