use serde::{Deserialize, Serialize};

use crate::models::SearchFilters;

/// Query parameters accepted by the search-vendors function
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// City substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Service type substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    /// Upper bound on a service's max price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
}

impl From<&SearchFilters> for SearchParams {
    fn from(filters: &SearchFilters) -> Self {
        Self {
            location: filters.location.clone(),
            vendor_type: filters.vendor_type.clone(),
            budget: filters.max_budget(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse_search_query;

    fn encoded(params: &SearchParams) -> Option<String> {
        reqwest::Client::new()
            .get("http://localhost/functions/v1/search-vendors")
            .query(params)
            .build()
            .unwrap()
            .url()
            .query()
            .map(str::to_string)
    }

    #[test]
    fn test_params_from_filters() {
        let filters = parse_search_query("Wedding catering in Delhi under 40k");
        let params = SearchParams::from(&filters);
        assert_eq!(
            encoded(&params).as_deref(),
            Some("location=Delhi&vendorType=Catering&budget=40000")
        );
    }

    #[test]
    fn test_empty_params() {
        let params = SearchParams::from(&parse_search_query("hello world"));
        assert_eq!(params, SearchParams::default());
        assert!(encoded(&params).map_or(true, |q| q.is_empty()));
    }
}
