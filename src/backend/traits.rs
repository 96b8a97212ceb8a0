use crate::models::{SearchFilters, Vendor};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for vendor listing sources
#[async_trait]
pub trait VendorSource: Send + Sync {
    /// Fetch vendors narrowed by the given filters
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Vendor>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
