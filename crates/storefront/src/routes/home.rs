//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use gearhouse_core::types::price::format_amount;

use crate::catalog::ProductRecord;
use crate::filters;
use crate::state::AppState;

/// Number of featured products on the landing page.
const FEATURED_PRODUCT_COUNT: u32 = 8;

/// Category or vendor link display data.
#[derive(Clone)]
pub struct SectionLinkView {
    pub href: String,
    pub name: String,
}

/// Featured product display data.
#[derive(Clone)]
pub struct FeaturedProductView {
    pub slug: String,
    pub name: String,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

impl From<&ProductRecord> for FeaturedProductView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            name: record.name.clone(),
            price: record.price.map(format_amount),
            image_url: record.image_url.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<SectionLinkView>,
    pub vendors: Vec<SectionLinkView>,
    pub products: Vec<FeaturedProductView>,
}

/// Display the home page.
///
/// Each section degrades to empty on a failed fetch; the landing page
/// never errors out because one list is unavailable.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let categories = state.catalog().list_categories().await.map_or_else(
        |e| {
            tracing::warn!("Failed to fetch categories for home page: {e}");
            Vec::new()
        },
        |categories| {
            categories
                .iter()
                .map(|c| SectionLinkView {
                    href: format!(
                        "/products?category={}",
                        urlencoding::encode(&c.id.to_string())
                    ),
                    name: c.name.clone(),
                })
                .collect()
        },
    );

    let vendors = state.catalog().list_vendors().await.map_or_else(
        |e| {
            tracing::warn!("Failed to fetch vendors for home page: {e}");
            Vec::new()
        },
        |vendors| {
            vendors
                .iter()
                .map(|v| SectionLinkView {
                    href: format!("/products?vendor={}", urlencoding::encode(&v.id.to_string())),
                    name: v.name.clone(),
                })
                .collect()
        },
    );

    let products = state
        .catalog()
        .featured_products(FEATURED_PRODUCT_COUNT)
        .await
        .map_or_else(
            |e| {
                tracing::warn!("Failed to fetch featured products: {e}");
                Vec::new()
            },
            |products| products.iter().map(FeaturedProductView::from).collect(),
        );

    HomeTemplate {
        categories,
        vendors,
        products,
    }
}
