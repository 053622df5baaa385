use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, warn};

/// REST client for the relational store's entity API. Collections are
/// exposed as `{base}/{collection}` with `eq.` style column filters, the
/// dialect spoken by PostgREST style backends.
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("Invalid store base url: {}", base_url);
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "apikey",
            header::HeaderValue::from_str(api_key)
                .context("Store api key is not a valid header value")?,
        );
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("Store api key is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Unable to create store http client")?;

        Ok(Self { client, base_url })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
    ) -> anyhow::Result<Vec<T>> {
        let res = self
            .client
            .get(&self.collection_url(collection))
            .query(filters)
            .send()
            .await
            .map_err(|e| {
                error!("Select on store collection: {} failed: {:?}", collection, e);
                e
            })?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            error!(
                "Select on store collection: {} failed with status: {} and body: {}",
                collection, status, body
            );
            anyhow::bail!(
                "Store select on {} failed with status: {}",
                collection,
                status
            );
        }
        res.json::<Vec<T>>().await.map_err(|e| {
            error!(
                "Unable to parse rows from store collection: {}: {:?}",
                collection, e
            );
            e.into()
        })
    }

    pub async fn insert<B: Serialize>(&self, collection: &str, body: &B) -> anyhow::Result<()> {
        match self.send_insert(collection, body).await? {
            StatusCode::CONFLICT => anyhow::bail!(
                "Store insert into {} hit a constraint violation",
                collection
            ),
            _ => Ok(()),
        }
    }

    /// Like `insert`, but a store uniqueness conflict returns `Ok(false)`
    /// instead of an error.
    pub async fn insert_unique<B: Serialize>(
        &self,
        collection: &str,
        body: &B,
    ) -> anyhow::Result<bool> {
        Ok(self.send_insert(collection, body).await? != StatusCode::CONFLICT)
    }

    async fn send_insert<B: Serialize>(
        &self,
        collection: &str,
        body: &B,
    ) -> anyhow::Result<StatusCode> {
        let res = self
            .client
            .post(&self.collection_url(collection))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Insert into store collection: {} failed: {:?}", collection, e);
                e
            })?;
        let status = res.status();
        if status.is_success() || status == StatusCode::CONFLICT {
            return Ok(status);
        }
        let body = res.text().await.unwrap_or_default();
        error!(
            "Insert into store collection: {} failed with status: {} and body: {}",
            collection, status, body
        );
        anyhow::bail!(
            "Store insert into {} failed with status: {}",
            collection,
            status
        )
    }

    pub async fn patch<B: Serialize>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
        body: &B,
    ) -> anyhow::Result<()> {
        let res = self
            .client
            .patch(&self.collection_url(collection))
            .query(filters)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Patch on store collection: {} failed: {:?}", collection, e);
                e
            })?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            error!(
                "Patch on store collection: {} failed with status: {} and body: {}",
                collection, status, body
            );
            anyhow::bail!(
                "Store patch on {} failed with status: {}",
                collection,
                status
            );
        }
        Ok(())
    }
}

/// Timestamps travel as RFC3339 strings in the store. Malformed values
/// degrade to epoch 0 with a warning so a bad row stays loadable.
pub fn parse_store_timestamp(value: Option<&str>) -> i64 {
    match value {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed.timestamp_millis(),
            Err(e) => {
                warn!("Malformed store timestamp: {}. Error: {:?}", raw, e);
                0
            }
        },
        None => 0,
    }
}

pub fn to_store_timestamp(timestamp_millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|parsed| parsed.to_rfc3339())
}
