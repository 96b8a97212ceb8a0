use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Budget bounds in whole currency units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl Budget {
    /// Budget with only an upper bound, the only shape the extractor produces
    pub fn up_to(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// Structured filters extracted from a free-text search.
///
/// Unset fields are left out of the serialized form entirely so consumers can
/// tell "no filter" apart from an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.event_type.is_none()
            && self.vendor_type.is_none()
            && self.budget.is_none()
    }

    pub fn max_budget(&self) -> Option<u64> {
        self.budget.and_then(|b| b.max)
    }
}

/// Result of parsing a query, as returned by the ai-search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub filters: SearchFilters,
    pub original_query: String,
}

/// Row shape of the `ai_query_log` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLogEntry {
    pub user_id: Option<String>,
    pub query_text: String,
    pub ai_parsed_data: ParsedQuery,
    pub created_at: DateTime<Utc>,
}

impl QueryLogEntry {
    pub fn new(parsed: &ParsedQuery, user_id: Option<&str>) -> Self {
        Self {
            user_id: user_id.map(str::to_string),
            query_text: parsed.original_query.clone(),
            ai_parsed_data: parsed.clone(),
            created_at: Utc::now(),
        }
    }
}

/// A bookable offering listed by a vendor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_types_supported: Vec<String>,
}

/// Core vendor listing as returned by the search-vendors function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub business_name: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub services: Vec<Service>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filters_serialize_without_keys() {
        let value = serde_json::to_value(SearchFilters::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_filters_use_camel_case() {
        let filters = SearchFilters {
            location: Some("Pune".to_string()),
            event_type: Some("Party".to_string()),
            vendor_type: Some("Cake".to_string()),
            budget: Some(Budget::up_to(15_000)),
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            value,
            json!({
                "location": "Pune",
                "eventType": "Party",
                "vendorType": "Cake",
                "budget": { "max": 15000 }
            })
        );
    }

    #[test]
    fn test_vendor_rows_tolerate_missing_columns() {
        let vendor: Vendor = serde_json::from_value(json!({
            "id": "v1",
            "business_name": "Royal Caterers",
            "city": "Mumbai",
            "services": [{ "id": "s1", "type": "Catering", "max_price": 100000 }]
        }))
        .unwrap();
        assert_eq!(vendor.services[0].service_type, "Catering");
        assert_eq!(vendor.services[0].max_price, Some(100_000));
        assert!(vendor.services[0].event_types_supported.is_empty());
    }
}
