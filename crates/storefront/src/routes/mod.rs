//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing (q, vendor, category, page)
//! GET  /product/{slug}         - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product by slug, redirect to /cart
//! POST /cart/update            - Update line quantity, redirect to /cart
//! POST /cart/remove            - Remove line, redirect to /cart
//! POST /cart/clear             - Empty the cart, redirect to /cart
//!
//! # Stubs
//! GET  /checkout               - Checkout placeholder
//! GET  /account                - Account placeholder
//! ```

pub mod cart;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .route("/products", get(products::index))
        .route("/product/{slug}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Stub pages
        .route("/checkout", get(pages::checkout))
        .route("/account", get(pages::account))
}
