use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::models::{ParsedQuery, QueryLogEntry};
use crate::search::extractor::parse_search_query;

/// Sink for parsed queries, kept for analytics
#[async_trait]
pub trait QueryLogger: Send + Sync {
    /// Record a parsed query
    async fn log(&self, entry: &QueryLogEntry) -> Result<()>;

    /// Get the name of the sink
    fn sink_name(&self) -> &'static str;
}

/// Writes queries to the tracing output only
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingQueryLogger;

#[async_trait]
impl QueryLogger for TracingQueryLogger {
    async fn log(&self, entry: &QueryLogEntry) -> Result<()> {
        let filters = serde_json::to_string(&entry.ai_parsed_data.filters)?;
        info!(
            query = %entry.query_text,
            user_id = entry.user_id.as_deref().unwrap_or("-"),
            %filters,
            "Logged search query"
        );
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "tracing"
    }
}

/// Inserts queries into the backend's `ai_query_log` table
pub struct RestQueryLogger {
    client: Client,
    endpoint: String,
    service_key: String,
}

impl RestQueryLogger {
    pub fn new(backend_url: &str, service_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/ai_query_log", backend_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        })
    }
}

#[async_trait]
impl QueryLogger for RestQueryLogger {
    async fn log(&self, entry: &QueryLogEntry) -> Result<()> {
        debug!("Inserting query log row into {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(SearchError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "rest"
    }
}

/// Hand a log entry to the logger without waiting for it.
///
/// A failing sink only produces a warning. Outside a tokio runtime the entry
/// is dropped and `None` is returned. The handle may be dropped; short-lived
/// processes can pass it to [`flush_after`] so the entry is not lost.
pub fn dispatch(logger: Arc<dyn QueryLogger>, entry: QueryLogEntry) -> Option<JoinHandle<()>> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            warn!(
                "No async runtime, skipping {} query log for {:?}",
                logger.sink_name(),
                entry.query_text
            );
            return None;
        }
    };

    Some(handle.spawn(async move {
        if let Err(e) = logger.log(&entry).await {
            warn!("Failed to log query to {} sink: {:#}", logger.sink_name(), e);
        }
    }))
}

/// Run `work`, then wait for a pending log entry whatever the outcome
pub async fn flush_after<F, T>(pending: Option<JoinHandle<()>>, work: F) -> T
where
    F: Future<Output = T>,
{
    let outcome = work.await;
    if let Some(handle) = pending {
        if let Err(e) = handle.await {
            warn!("Query log task did not finish: {}", e);
        }
    }
    outcome
}

pub fn parse_query(query: &str) -> ParsedQuery {
    ParsedQuery {
        filters: parse_search_query(query),
        original_query: query.to_string(),
    }
}

/// Parse a query and record it in the background
pub fn parse_and_log(
    query: &str,
    user_id: Option<&str>,
    logger: Arc<dyn QueryLogger>,
) -> ParsedQuery {
    let parsed = parse_query(query);
    dispatch(logger, QueryLogEntry::new(&parsed, user_id));
    parsed
}
