//! Hosted catalog API client.
//!
//! # Architecture
//!
//! - The catalog lives in a hosted `PostgREST`-style backend; the
//!   storefront consumes it read-only over HTTP
//! - Filtering, ordering, and pagination are delegated to the backend via
//!   query parameters and range headers - nothing is reimplemented locally
//! - Every call is a single best-effort attempt: no retries, no caching,
//!   each page render fetches fresh data
//!
//! # Example
//!
//! ```rust,ignore
//! use gearhouse_storefront::catalog::{CatalogClient, CatalogQuery};
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // One catalog page, filtered and windowed by the backend
//! let page = client
//!     .list_products(&CatalogQuery::new().with_search("wrench").with_page(2))
//!     .await?;
//!
//! // One product for the detail page
//! let product = client.get_product_by_slug("impact-wrench").await?;
//! ```

mod client;
mod query;
mod types;

pub use client::CatalogClient;
pub use query::{CatalogQuery, PAGE_SIZE};
pub use types::{CategoryRecord, ProductPage, ProductRecord, VendorRecord};

use thiserror::Error;

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("Catalog API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product impact-wrench".to_string());
        assert_eq!(err.to_string(), "Not found: product impact-wrench");

        let err = CatalogError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog API error (status 503): upstream unavailable"
        );
    }
}
