//! reqwest implementation of [`CustomerApi`].

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::CustomerApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Group, GroupId, GroupPayload, Person, Unit, UnitId, UnitPayload};

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pick the server's `error` field out of a response body, if any.
fn server_error(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

pub struct HttpCustomerApi {
    client: Client,
    base_url: String,
}

impl HttpCustomerApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn persons_url(&self, domain: &str) -> Result<url::Url> {
        url::Url::parse_with_params(&self.url("persons/by-domain"), &[("domain", domain)])
            .map_err(|e| Error::Config(format!("bad api url {:?}: {}", self.base_url, e)))
    }

    async fn check(response: Response, fallback: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match server_error(&body) {
            Some(message) => {
                warn!("{} {}: {}", status.as_u16(), fallback, message);
                Err(Error::request_failed(status.as_u16(), message))
            }
            None => {
                warn!("{} {}", status.as_u16(), fallback);
                Err(Error::request_failed_generic(status.as_u16(), fallback))
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T> {
        let response = Self::check(request.send().await?, fallback).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CustomerApi for HttpCustomerApi {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        debug!("GET groups");
        self.fetch(self.client.get(self.url("groups")), "Failed to fetch customers")
            .await
    }

    async fn get_unit(&self, unit_id: UnitId) -> Result<Unit> {
        debug!("GET unit {}", unit_id);
        self.fetch(
            self.client.get(self.url(&format!("units/{}", unit_id))),
            "Failed to fetch unit details",
        )
        .await
    }

    async fn get_complete_group(&self, groupe_id: GroupId) -> Result<Group> {
        debug!("GET complete group {}", groupe_id);
        self.fetch(
            self.client.get(self.url(&format!("groups/{}/complete", groupe_id))),
            "Failed to fetch customer details",
        )
        .await
    }

    async fn list_persons_by_domain(&self, domain: &str) -> Result<Vec<Person>> {
        debug!("GET persons for @{}", domain);
        let url = self.persons_url(domain)?;
        self.fetch(self.client.get(url), "Failed to fetch persons").await
    }

    async fn create_group(&self, payload: &GroupPayload) -> Result<Group> {
        debug!("POST group {:?}", payload.groupe_name);
        self.fetch(
            self.client.post(self.url("groups")).json(payload),
            "Failed to create group",
        )
        .await
    }

    async fn update_group(&self, groupe_id: GroupId, payload: &GroupPayload) -> Result<Group> {
        debug!("PUT group {}", groupe_id);
        self.fetch(
            self.client
                .put(self.url(&format!("groups/{}", groupe_id)))
                .json(payload),
            "Failed to update group",
        )
        .await
    }

    async fn delete_group(&self, groupe_id: GroupId) -> Result<()> {
        debug!("DELETE group {}", groupe_id);
        let request = self.client.delete(self.url(&format!("groups/{}", groupe_id)));
        Self::check(request.send().await?, "Failed to delete group").await?;
        Ok(())
    }

    async fn create_unit(&self, payload: &UnitPayload) -> Result<Unit> {
        debug!("POST unit {:?} in group {}", payload.unit_name, payload.groupe_id);
        self.fetch(
            self.client.post(self.url("units")).json(payload),
            "Unknown error",
        )
        .await
    }

    async fn update_unit(&self, unit_id: UnitId, payload: &UnitPayload) -> Result<Unit> {
        debug!("PUT unit {}", unit_id);
        self.fetch(
            self.client
                .put(self.url(&format!("units/{}", unit_id)))
                .json(payload),
            "Unknown error",
        )
        .await
    }
}
