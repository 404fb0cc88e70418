//! Static page stubs.
//!
//! Checkout and account are placeholders: order submission and purchase
//! history live behind flows this storefront does not implement yet.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/checkout.html")]
pub struct CheckoutTemplate;

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/account.html")]
pub struct AccountTemplate;

/// Display the checkout placeholder.
pub async fn checkout() -> impl IntoResponse {
    CheckoutTemplate
}

/// Display the account placeholder.
pub async fn account() -> impl IntoResponse {
    AccountTemplate
}
