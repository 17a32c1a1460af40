use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    airtable::types::{AirtableErrorResponse, AirtableListResponse, AirtableWriteRequest},
    error::StoreError,
    store::{Fields, Record, RecordStore},
};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Airtable REST client bound to a single base
pub struct AirtableClient {
    api_key: String,
    base_id: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl AirtableClient {
    /// Create a new client for the given API key and base id
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Result<Self, StoreError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(StoreError::authentication("API key cannot be empty"));
        }
        let base_id = base_id.into();
        if base_id.is_empty() {
            return Err(StoreError::authentication("Base id cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_id,
            base_url: DEFAULT_API_URL.to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| StoreError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Build `{base_url}/v0/{base}/{table}[/{record}]` with each segment
    /// percent-encoded, so table names may contain spaces.
    fn table_url(&self, table: &str, record_id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::internal(format!("Invalid base URL: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::internal("Base URL cannot carry a path"))?;
            segments.pop_if_empty().push("v0").push(&self.base_id).push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let parsed = serde_json::from_str::<AirtableErrorResponse>(&body).ok();
        let message = parsed
            .as_ref()
            .and_then(|e| e.message())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(StoreError::api_error(
            status.as_u16(),
            message,
            parsed.map(|e| e.error),
        ))
    }

    async fn write(
        &self,
        method: reqwest::Method,
        url: Url,
        fields: Fields,
    ) -> Result<Record, StoreError> {
        let request = AirtableWriteRequest { fields };
        debug!(method = %method, url = %url, "Sending record to Airtable");

        let response = self
            .http_client
            .request(method, url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn find_records(
        &self,
        table: &str,
        filter_formula: &str,
    ) -> Result<Vec<Record>, StoreError> {
        let url = self.table_url(table, None)?;
        debug!(url = %url, filter = filter_formula, "Querying Airtable");

        let response = self
            .http_client
            .get(url)
            .headers(self.headers()?)
            .query(&[("filterByFormula", filter_formula)])
            .send()
            .await?;

        let list: AirtableListResponse = Self::handle_response(response).await?;
        Ok(list.records)
    }

    async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, StoreError> {
        let url = self.table_url(table, Some(record_id))?;
        self.write(reqwest::Method::PATCH, url, fields).await
    }

    async fn create_record(&self, table: &str, fields: Fields) -> Result<Record, StoreError> {
        let url = self.table_url(table, None)?;
        self.write(reqwest::Method::POST, url, fields).await
    }

    fn store_name(&self) -> &str {
        "airtable"
    }
}
