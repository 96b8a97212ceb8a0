pub mod memory;
pub mod rest;
pub mod traits;
pub mod types;

pub use memory::{vendor_matches, InMemoryVendorSource};
pub use rest::RestVendorSource;
pub use traits::VendorSource;
pub use types::SearchParams;
