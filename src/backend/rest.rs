use crate::backend::traits::VendorSource;
use crate::backend::types::SearchParams;
use crate::error::SearchError;
use crate::models::{SearchFilters, Vendor};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the backend's search-vendors function
pub struct RestVendorSource {
    client: Client,
    endpoint: String,
    service_key: Option<String>,
}

impl RestVendorSource {
    /// Create a client for the backend at `backend_url`
    pub fn new(backend_url: &str, service_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vendor-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/functions/v1/search-vendors",
                backend_url.trim_end_matches('/')
            ),
            service_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VendorSource for RestVendorSource {
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Vendor>> {
        let params = SearchParams::from(filters);
        info!("Searching vendors with {:?}", params);

        let mut request = self.client.get(&self.endpoint).query(&params);
        if let Some(key) = &self.service_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(SearchError::Http)
            .context("Failed to reach search-vendors")?;

        let status = response.status();
        if !status.is_success() {
            warn!("search-vendors returned status: {}", status);
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        debug!("Downloaded {} bytes of vendor data", body.len());

        let vendors: Vec<Vendor> = serde_json::from_str(&body).map_err(SearchError::Decode)?;
        info!("Found {} vendors", vendors.len());

        Ok(vendors)
    }

    fn source_name(&self) -> &'static str {
        "search-vendors"
    }
}
