use crate::backend::traits::VendorSource;
use crate::models::{SearchFilters, Service, Vendor};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Vendor source over a fixed listing, narrowed locally
#[derive(Debug, Clone, Default)]
pub struct InMemoryVendorSource {
    vendors: Vec<Vendor>,
}

impl InMemoryVendorSource {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self { vendors }
    }
}

#[async_trait]
impl VendorSource for InMemoryVendorSource {
    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Vendor>> {
        let matched: Vec<Vendor> = self
            .vendors
            .iter()
            .filter(|v| vendor_matches(v, filters))
            .cloned()
            .collect();
        debug!("{} of {} vendors matched", matched.len(), self.vendors.len());
        Ok(matched)
    }

    fn source_name(&self) -> &'static str {
        "in-memory"
    }
}

/// Whether a vendor satisfies every populated filter.
///
/// Text filters are case-insensitive substring matches. A budget needs some
/// service whose max price is known and within it.
pub fn vendor_matches(vendor: &Vendor, filters: &SearchFilters) -> bool {
    if let Some(location) = &filters.location {
        if !contains_ignore_case(&vendor.city, location) {
            return false;
        }
    }

    if let Some(vendor_type) = &filters.vendor_type {
        if !vendor
            .services
            .iter()
            .any(|s| contains_ignore_case(&s.service_type, vendor_type))
        {
            return false;
        }
    }

    if let Some(event_type) = &filters.event_type {
        if !vendor.services.iter().any(|s| supports_event(s, event_type)) {
            return false;
        }
    }

    if let Some(max) = filters.max_budget() {
        if !vendor.services.iter().any(|s| within_budget(s, max)) {
            return false;
        }
    }

    true
}

/// Services that list no event types are treated as general purpose.
fn supports_event(service: &Service, event_type: &str) -> bool {
    service.event_types_supported.is_empty()
        || service
            .event_types_supported
            .iter()
            .any(|e| e.eq_ignore_ascii_case(event_type))
}

fn within_budget(service: &Service, max: u64) -> bool {
    match service.max_price {
        Some(price) => price >= 0 && (price as u64) <= max,
        None => false,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
