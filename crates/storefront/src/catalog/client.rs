//! HTTP client for the catalog backend.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::CatalogConfig;

use super::query::CatalogQuery;
use super::types::{
    CategoryRecord, ProductPage, ProductRecord, VendorRecord, parse_content_range_total,
};
use super::CatalogError;

/// Client for the hosted catalog REST API.
///
/// Cheaply cloneable via `Arc`. Every method is a single attempt with no
/// retry and no caching.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a GET against one table endpoint and parse the JSON rows.
    ///
    /// Fetches the body as text first so parse failures can be logged with
    /// a snippet of what the backend actually sent.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
        range: Option<&str>,
    ) -> Result<(Vec<T>, Option<u64>), CatalogError> {
        let url = format!("{}/{table}", self.inner.api_url);

        let mut request = self
            .inner
            .client
            .get(&url)
            .header("apikey", &self.inner.api_key)
            .bearer_auth(&self.inner.api_key)
            .header("Accept", "application/json")
            .query(params);

        if let Some(range) = range {
            request = request
                .header("Range-Unit", "items")
                .header("Range", range)
                .header("Prefer", "count=exact");
        }

        let response = request.send().await?;
        let status = response.status();

        let total = response
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                table,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let rows: Vec<T> = match serde_json::from_str(&body) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    table,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        Ok((rows, total))
    }

    /// Fetch one catalog page of products.
    ///
    /// The backend applies the query's filters and ordering and reports the
    /// exact total match count for pagination. An out-of-range page comes
    /// back as an empty product list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &CatalogQuery) -> Result<ProductPage, CatalogError> {
        let params = query.query_params();
        let range = query.range_header();

        let (products, total) = self
            .fetch_rows::<ProductRecord>("products", &params, Some(&range))
            .await?;

        // A missing count header can only undercount; fall back to what we
        // can see.
        let total_count = total.unwrap_or(products.len() as u64);

        Ok(ProductPage {
            products,
            total_count,
        })
    }

    /// Fetch a single product by slug.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no row matches the slug, or
    /// another variant if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, CatalogError> {
        let params = [
            (
                "select",
                "id,slug,name,sku,price,description,image_url,vendor_id,category_id".to_string(),
            ),
            ("slug", format!("eq.{slug}")),
            ("limit", "1".to_string()),
        ];

        let (mut rows, _) = self
            .fetch_rows::<ProductRecord>("products", &params, None)
            .await?;

        rows.pop()
            .ok_or_else(|| CatalogError::NotFound(format!("product {slug}")))
    }

    /// Fetch all vendors, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_vendors(&self) -> Result<Vec<VendorRecord>, CatalogError> {
        let params = [
            ("select", "id,name".to_string()),
            ("order", "name.asc".to_string()),
        ];
        let (rows, _) = self.fetch_rows("vendors", &params, None).await?;
        Ok(rows)
    }

    /// Fetch all categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogError> {
        let params = [
            ("select", "id,name".to_string()),
            ("order", "name.asc".to_string()),
        ];
        let (rows, _) = self.fetch_rows("categories", &params, None).await?;
        Ok(rows)
    }

    /// Fetch a handful of products for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self, limit: u32) -> Result<Vec<ProductRecord>, CatalogError> {
        let params = [
            (
                "select",
                "id,slug,name,sku,price,image_url,vendor_id,category_id".to_string(),
            ),
            ("order", "name.asc".to_string()),
            ("limit", limit.to_string()),
        ];
        let (rows, _) = self.fetch_rows("products", &params, None).await?;
        Ok(rows)
    }

    /// Cheap connectivity probe for the readiness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog backend is unreachable.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        let params = [
            ("select", "id".to_string()),
            ("limit", "1".to_string()),
        ];
        let _ = self
            .fetch_rows::<serde_json::Value>("categories", &params, None)
            .await?;
        Ok(())
    }
}
