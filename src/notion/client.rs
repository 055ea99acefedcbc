// src/notion/client.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::config::{Config, STORE_PAGE_SIZE};
use crate::notion::{QueryFilter, StoreError, property::PropertyValue};

/// HTTP client for the store's database query endpoint.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    version: String,
    timeout_secs: u64,
}

/// Body of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<QueryFilter>,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// A database record.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// Every page collected by `query_all`.
#[derive(Debug, Default)]
pub struct QueryOutcome {
    pub pages: Vec<Page>,
    /// The store still had pages when the record cap stopped pagination.
    pub truncated: bool,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.notion_timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.notion_base_url)?,
            token: config.notion_token.clone(),
            version: config.notion_version.clone(),
            timeout_secs: config.notion_timeout.as_secs(),
        })
    }

    /// Fetches one page of query results.
    #[instrument(skip(self, request), fields(cursor = ?request.start_cursor))]
    pub async fn query_database(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse, StoreError> {
        let url = self
            .base_url
            .join(&format!("v1/databases/{}/query", database_id))?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Timeout(self.timeout_secs)
                } else {
                    StoreError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| {
                    if body.is_empty() {
                        format!("store responded with HTTP {}", status.as_u16())
                    } else {
                        body
                    }
                });
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Walks the query's pages in order until the store runs out of pages or
    /// at least `cap` records have been collected.
    ///
    /// Each request needs the previous response's cursor, so pages are fetched
    /// one after another. The first failing page fails the whole call.
    pub async fn query_all(
        &self,
        database_id: &str,
        filter: Option<QueryFilter>,
        cap: usize,
    ) -> Result<QueryOutcome, StoreError> {
        let mut request = QueryRequest {
            filter,
            page_size: STORE_PAGE_SIZE,
            start_cursor: None,
        };
        let mut outcome = QueryOutcome::default();
        let mut has_more = true;

        while has_more && outcome.pages.len() < cap {
            let page = self.query_database(database_id, &request).await?;
            outcome.pages.extend(page.results);

            tracing::debug!(
                "Fetched {} quiz records so far (has_more: {})",
                outcome.pages.len(),
                page.has_more
            );

            has_more = page.has_more && page.next_cursor.is_some();
            request.start_cursor = page.next_cursor;
        }

        outcome.truncated = has_more;
        Ok(outcome)
    }
}
