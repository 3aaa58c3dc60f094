// Client for the hosted datastore's PostgREST interface

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use backend_domain::{Event, EventRepository, Rsvp, RsvpRepository};

const EVENT_COLUMNS: &str = "id,event_name,user_id";

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, request_timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("datastore responded {}: {}", status, body));
        }
        Ok(response.json::<Vec<T>>().await?)
    }
}

pub(crate) fn event_filters(event_id: &str, owner_id: Option<&str>) -> Vec<(&'static str, String)> {
    let mut filters = vec![
        ("select", EVENT_COLUMNS.to_string()),
        ("id", format!("eq.{event_id}")),
    ];
    if let Some(owner) = owner_id {
        filters.push(("user_id", format!("eq.{owner}")));
    }
    filters.push(("limit", "1".to_string()));
    filters
}

/// Guard for the check-in PATCH: right event, not yet checked in (null counts as no).
pub(crate) fn check_in_filters(rsvp_id: &str, event_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("id", format!("eq.{rsvp_id}")),
        ("event_id", format!("eq.{event_id}")),
        ("checked_in", "not.is.true".to_string()),
    ]
}

pub(crate) fn check_in_body(at: DateTime<Utc>) -> serde_json::Value {
    json!({
        "checked_in": true,
        "checked_in_at": at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[async_trait]
impl EventRepository for RestStore {
    async fn find_event(&self, event_id: &str, owner_id: Option<&str>) -> Result<Option<Event>> {
        let request = self
            .request(Method::GET, "events")
            .query(&event_filters(event_id, owner_id));
        let rows: Vec<Event> = self.fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn ping(&self) -> Result<()> {
        let request = self
            .request(Method::GET, "events")
            .query(&[("select", "id"), ("limit", "1")]);
        let _: Vec<serde_json::Value> = self.fetch_rows(request).await?;
        Ok(())
    }
}

#[async_trait]
impl RsvpRepository for RestStore {
    async fn find_rsvp(&self, rsvp_id: &str) -> Result<Option<Rsvp>> {
        let request = self.request(Method::GET, "rsvps").query(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{rsvp_id}")),
            ("limit", "1".to_string()),
        ]);
        let rows: Vec<Rsvp> = self.fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn mark_checked_in(
        &self,
        rsvp_id: &str,
        event_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Rsvp>> {
        let request = self
            .request(Method::PATCH, "rsvps")
            .query(&check_in_filters(rsvp_id, event_id))
            .header("Prefer", "return=representation")
            .json(&check_in_body(at));
        let rows: Vec<Rsvp> = self.fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_rsvps(&self, event_id: &str) -> Result<Vec<Rsvp>> {
        let request = self.request(Method::GET, "rsvps").query(&[
            ("select", "*".to_string()),
            ("event_id", format!("eq.{event_id}")),
            ("order", "submitted_at.desc.nullslast".to_string()),
        ]);
        self.fetch_rows(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn table_url_strips_trailing_slash() {
        let store = RestStore::new("https://abc.example.co/", "key", 10).expect("client");
        assert_eq!(store.table_url("rsvps"), "https://abc.example.co/rest/v1/rsvps");
    }

    #[test]
    fn event_lookup_filters_by_owner_when_given() {
        let filters = event_filters("e1", Some("host-1"));
        assert!(filters.contains(&("id", "eq.e1".to_string())));
        assert!(filters.contains(&("user_id", "eq.host-1".to_string())));
        assert!(!event_filters("e1", None)
            .iter()
            .any(|(key, _)| *key == "user_id"));
    }

    #[test]
    fn check_in_patch_is_guarded() {
        let filters = check_in_filters("r1", "e1");
        assert_eq!(
            filters,
            vec![
                ("id", "eq.r1".to_string()),
                ("event_id", "eq.e1".to_string()),
                ("checked_in", "not.is.true".to_string()),
            ]
        );
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 19, 30, 0).unwrap();
        let body = check_in_body(at);
        assert_eq!(body["checked_in"], true);
        assert_eq!(body["checked_in_at"], "2025-03-01T19:30:00.000Z");
    }
}
