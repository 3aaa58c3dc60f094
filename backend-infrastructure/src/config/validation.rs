use anyhow::{anyhow, Result};

pub const STORE_BACKENDS: [&str; 2] = ["memory", "rest"];

pub fn validate_store_backend(value: &str) -> Result<()> {
    if STORE_BACKENDS.contains(&value) {
        return Ok(());
    }
    Err(anyhow!(
        "unknown store_backend '{}', expected one of {:?}",
        value,
        STORE_BACKENDS
    ))
}

pub fn validate_store_url(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("store_url is required for the rest backend"));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(anyhow!("store_url must be an http(s) url"));
    }
    Ok(())
}
