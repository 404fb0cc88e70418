//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use gearhouse_core::types::price::format_amount;

use crate::catalog::{CatalogError, CatalogQuery, CategoryRecord, ProductRecord, VendorRecord};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product card display data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub sku: String,
    pub price: Option<String>,
}

impl From<&ProductRecord> for ProductCardView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            name: record.name.clone(),
            sku: record.sku.clone().unwrap_or_else(|| "N/A".to_string()),
            price: record.price.map(format_amount),
        }
    }
}

/// Sidebar filter link display data.
#[derive(Clone)]
pub struct FilterLinkView {
    pub href: String,
    pub name: String,
}

/// One numbered pagination link.
#[derive(Clone)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Catalog query string parameters.
///
/// `page` stays a raw string here so non-numeric input falls back to
/// page 1 instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
}

impl CatalogParams {
    fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::new();
        if let Some(q) = &self.q {
            query = query.with_search(q.as_str());
        }
        if let Some(vendor) = &self.vendor {
            query = query.with_vendor(vendor.as_str());
        }
        if let Some(category) = &self.category {
            query = query.with_category(category.as_str());
        }
        query.with_page_param(self.page.as_deref())
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub vendors: Vec<FilterLinkView>,
    pub categories: Vec<FilterLinkView>,
    pub pages: Vec<PageLink>,
    pub error: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub slug: String,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Build the href for one pagination link, carrying the active filters.
fn page_href(query: &CatalogQuery, page: u32) -> String {
    let mut parts = Vec::new();
    if let Some(q) = query.search_text() {
        parts.push(format!("q={}", urlencoding::encode(q)));
    }
    if let Some(vendor) = query.vendor_id() {
        parts.push(format!("vendor={}", urlencoding::encode(vendor)));
    }
    if let Some(category) = query.category_id() {
        parts.push(format!("category={}", urlencoding::encode(category)));
    }
    parts.push(format!("page={page}"));
    format!("/products?{}", parts.join("&"))
}

fn page_links(query: &CatalogQuery, total_pages: u32) -> Vec<PageLink> {
    (1..=total_pages)
        .map(|number| PageLink {
            number,
            href: page_href(query, number),
            current: number == query.page(),
        })
        .collect()
}

/// Fetch the sidebar vendor and category lists.
///
/// Failures here must not take the catalog page down: the lists degrade to
/// empty and the sidebar renders "No vendors" / "No categories".
async fn sidebar_links(state: &AppState) -> (Vec<FilterLinkView>, Vec<FilterLinkView>) {
    let vendors = state.catalog().list_vendors().await.map_or_else(
        |e| {
            tracing::warn!("Failed to fetch vendors for sidebar: {e}");
            Vec::new()
        },
        |vendors| {
            vendors
                .iter()
                .map(|VendorRecord { id, name }| FilterLinkView {
                    href: format!("/products?vendor={}", urlencoding::encode(&id.to_string())),
                    name: name.clone(),
                })
                .collect()
        },
    );

    let categories = state.catalog().list_categories().await.map_or_else(
        |e| {
            tracing::warn!("Failed to fetch categories for sidebar: {e}");
            Vec::new()
        },
        |categories| {
            categories
                .iter()
                .map(|CategoryRecord { id, name }| FilterLinkView {
                    href: format!(
                        "/products?category={}",
                        urlencoding::encode(&id.to_string())
                    ),
                    name: name.clone(),
                })
                .collect()
        },
    );

    (vendors, categories)
}

/// Display the product listing page.
///
/// A catalog fetch failure renders inline on the page rather than
/// replacing it with an error response.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    let (vendors, categories) = sidebar_links(&state).await;

    match state.catalog().list_products(&query).await {
        Ok(page) => ProductsIndexTemplate {
            products: page.products.iter().map(ProductCardView::from).collect(),
            vendors,
            categories,
            pages: page_links(&query, page.total_pages()),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            ProductsIndexTemplate {
                products: Vec::new(),
                vendors,
                categories,
                pages: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Display the product detail page.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = state
        .catalog()
        .get_product_by_slug(&slug)
        .await
        .map_err(|e| match e {
            CatalogError::NotFound(_) => AppError::NotFound(format!("product {slug}")),
            other => AppError::from(other),
        })?;

    Ok(ProductShowTemplate {
        slug: product.slug,
        name: product.name,
        sku: product.sku,
        price: product.price.map(format_amount),
        description: product.description,
        image_url: product.image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_href_carries_filters() {
        let query = CatalogQuery::new()
            .with_search("impact wrench")
            .with_vendor("7");
        assert_eq!(
            page_href(&query, 3),
            "/products?q=impact%20wrench&vendor=7&page=3"
        );
    }

    #[test]
    fn test_page_href_without_filters() {
        let query = CatalogQuery::new();
        assert_eq!(page_href(&query, 1), "/products?page=1");
    }

    #[test]
    fn test_page_links_mark_current() {
        let query = CatalogQuery::new().with_page(2);
        let links = page_links(&query, 3);

        assert_eq!(links.len(), 3);
        let current: Vec<u32> = links
            .iter()
            .filter(|link| link.current)
            .map(|link| link.number)
            .collect();
        assert_eq!(current, vec![2]);
    }

    #[test]
    fn test_params_to_query() {
        let params = CatalogParams {
            q: Some("wrench".to_string()),
            vendor: None,
            category: Some("9".to_string()),
            page: Some("2".to_string()),
        };
        let query = params.to_query();

        assert_eq!(query.search_text(), Some("wrench"));
        assert_eq!(query.vendor_id(), None);
        assert_eq!(query.category_id(), Some("9"));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_card_view_sku_fallback() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "slug": "s", "name": "n"}"#).expect("valid record");
        let card = ProductCardView::from(&record);
        assert_eq!(card.sku, "N/A");
        assert_eq!(card.price, None);
    }
}
