//! Wire types for the catalog backend.

use gearhouse_core::types::{RecordId, price};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::query::PAGE_SIZE;

/// A product row as returned by the backend.
///
/// `price` is nullable: a product without a price is browsable but cannot
/// be added to the cart. The backend may serialize numeric columns as JSON
/// numbers or strings; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: RecordId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "price::deserialize_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<RecordId>,
    #[serde(default)]
    pub category_id: Option<RecordId>,
}

/// A vendor row for sidebar filter links.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorRecord {
    pub id: RecordId,
    pub name: String,
}

/// A category row for sidebar filter links.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: RecordId,
    pub name: String,
}

/// One page of catalog results plus the exact total row count.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub total_count: u64,
}

impl ProductPage {
    /// Number of catalog pages for the total count, never less than 1.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count)
    }
}

/// ceil(total / page size), clamped to at least one page.
#[must_use]
pub fn total_pages(total_count: u64) -> u32 {
    let pages = total_count.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
}

/// Parse the total row count out of a `Content-Range` header value.
///
/// The backend answers range requests with `<from>-<to>/<total>` (for
/// example `12-23/25`), or `*/<total>` when the window is empty. Returns
/// `None` for malformed values or an unknown (`*`) total.
#[must_use]
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}
