//! Vendor search for an event marketplace.
//!
//! Free-text queries like `"Wedding photographer in Mumbai under 50k"` are
//! turned into [`SearchFilters`] by [`parse_search_query`], optionally logged
//! through a [`QueryLogger`], and handed to a [`VendorSource`].

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod server;

pub use backend::{InMemoryVendorSource, RestVendorSource, VendorSource};
pub use config::Config;
pub use error::SearchError;
pub use models::{Budget, ParsedQuery, QueryLogEntry, SearchFilters, Service, Vendor};
pub use search::{parse_and_log, parse_search_query, QueryLogger};
