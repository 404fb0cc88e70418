//! Catalog query builder.
//!
//! Translates page-level parameters (search text, vendor, category, page
//! number) into the backend's query parameters and range headers. The
//! backend does the actual filtering; this module only builds the request
//! shape.

/// Fixed number of products per catalog page.
pub const PAGE_SIZE: u32 = 12;

/// Columns fetched for catalog listing cards.
const LISTING_COLUMNS: &str = "id,slug,name,sku,price,vendor_id,category_id";

/// Page-level catalog parameters.
///
/// `page` is 1-based. Out-of-range pages are not clamped here: the backend
/// answers them with an empty window rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    search: Option<String>,
    vendor: Option<String>,
    category: Option<String>,
    page: u32,
}

impl CatalogQuery {
    /// An unfiltered first-page query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: None,
            vendor: None,
            category: None,
            page: 1,
        }
    }

    /// Case-insensitive substring match on the product name.
    ///
    /// Whitespace-only input is treated as no search.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Equality filter on the vendor id.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Equality filter on the category id.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 1-based page number. Values below 1 are treated as page 1.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Parse a page number from raw user input, defaulting to 1 for
    /// absent or non-numeric values.
    #[must_use]
    pub fn with_page_param(self, raw: Option<&str>) -> Self {
        let page = raw.and_then(|p| p.trim().parse::<u32>().ok()).unwrap_or(1);
        self.with_page(page)
    }

    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub fn vendor_id(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Query parameters for the products endpoint: column selection,
    /// `ilike`/`eq` filters, and ascending name order.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", LISTING_COLUMNS.to_string())];

        if let Some(text) = &self.search {
            params.push(("name", format!("ilike.*{text}*")));
        }
        if let Some(vendor) = &self.vendor {
            params.push(("vendor_id", format!("eq.{vendor}")));
        }
        if let Some(category) = &self.category {
            params.push(("category_id", format!("eq.{category}")));
        }

        params.push(("order", "name.asc".to_string()));
        params
    }

    /// Zero-based inclusive item window for the requested page, in
    /// `Range` header form: `(page-1)*size .. page*size - 1`.
    #[must_use]
    pub fn range_header(&self) -> String {
        let from = u64::from(self.page - 1) * u64::from(PAGE_SIZE);
        let to = from + u64::from(PAGE_SIZE) - 1;
        format!("{from}-{to}")
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_search_and_page() {
        let query = CatalogQuery::new()
            .with_search("wrench")
            .with_page_param(Some("2"));

        let params = query.query_params();
        assert_eq!(param(&params, "name"), Some("ilike.*wrench*"));
        assert_eq!(param(&params, "order"), Some("name.asc"));
        assert_eq!(query.range_header(), "12-23");
    }

    #[test]
    fn test_defaults() {
        let query = CatalogQuery::new();
        let params = query.query_params();

        assert_eq!(
            param(&params, "select"),
            Some("id,slug,name,sku,price,vendor_id,category_id")
        );
        assert_eq!(param(&params, "name"), None);
        assert_eq!(param(&params, "vendor_id"), None);
        assert_eq!(param(&params, "category_id"), None);
        assert_eq!(query.range_header(), "0-11");
    }

    #[test]
    fn test_vendor_and_category_filters() {
        let query = CatalogQuery::new().with_vendor("7").with_category("u-3");
        let params = query.query_params();

        assert_eq!(param(&params, "vendor_id"), Some("eq.7"));
        assert_eq!(param(&params, "category_id"), Some("eq.u-3"));
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let query = CatalogQuery::new().with_search("   ");
        assert_eq!(query.search_text(), None);
        assert_eq!(param(&query.query_params(), "name"), None);
    }

    #[test]
    fn test_search_is_trimmed() {
        let query = CatalogQuery::new().with_search("  torque  ");
        assert_eq!(query.search_text(), Some("torque"));
        assert_eq!(
            param(&query.query_params(), "name"),
            Some("ilike.*torque*")
        );
    }

    #[test]
    fn test_page_param_parsing() {
        assert_eq!(CatalogQuery::new().with_page_param(None).page(), 1);
        assert_eq!(CatalogQuery::new().with_page_param(Some("3")).page(), 3);
        assert_eq!(CatalogQuery::new().with_page_param(Some("abc")).page(), 1);
        assert_eq!(CatalogQuery::new().with_page_param(Some("")).page(), 1);
        assert_eq!(CatalogQuery::new().with_page_param(Some("-2")).page(), 1);
        assert_eq!(CatalogQuery::new().with_page_param(Some("0")).page(), 1);
    }

    #[test]
    fn test_out_of_range_page_is_not_clamped() {
        // The backend answers far-out pages with an empty window.
        let query = CatalogQuery::new().with_page(99);
        assert_eq!(query.range_header(), "1176-1187");
    }
}
