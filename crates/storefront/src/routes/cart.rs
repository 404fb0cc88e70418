//! Cart route handlers.
//!
//! The cart lives in process memory, scoped to the browser session; every
//! mutation is a plain form post followed by a redirect back to the cart
//! page. The session cookie only carries the cart scope key.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gearhouse_core::cart::{CartHandle, CartLineItem};
use gearhouse_core::types::RecordId;
use gearhouse_core::types::price::format_amount;

use crate::cart::{add_to_cart, cart_key};
use crate::catalog::CatalogError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub quantity: i64,
    pub price: String,
    pub line_total: String,
}

impl From<&CartLineItem> for CartLineView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            slug: item.slug.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: format_amount(item.price),
            line_total: format_amount(item.line_total()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub slug: String,
}

/// Update quantity form data.
///
/// The quantity is passed through as-is; a floor on it is presentation
/// policy, not a store rule.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Resolve the session's cart handle, provisioning a cart on first use.
async fn session_cart(state: &AppState, session: &Session) -> Result<CartHandle> {
    let key = cart_key(session).await?;
    Ok(state.carts().handle(key))
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = session_cart(&state, &session).await?;

    let items = cart.items()?;
    let total = cart.total()?;

    Ok(CartShowTemplate {
        cart: CartView {
            items: items.iter().map(CartLineView::from).collect(),
            total: format_amount(total),
        },
    })
}

/// Add a product to the cart by slug.
///
/// The product is re-fetched so the cart stores current catalog data. A
/// product with no price is silently not added.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .get_product_by_slug(&form.slug)
        .await
        .map_err(|e| match e {
            CatalogError::NotFound(_) => AppError::NotFound(format!("product {}", form.slug)),
            other => AppError::from(other),
        })?;
    let cart = session_cart(&state, &session).await?;

    if !add_to_cart(&cart, &product)? {
        tracing::debug!(slug = %form.slug, "Product has no price, add suppressed");
    }

    Ok(Redirect::to("/cart"))
}

/// Update the quantity of a cart line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let cart = session_cart(&state, &session).await?;
    cart.set_quantity(&RecordId::from(form.id.as_str()), form.quantity)?;

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let cart = session_cart(&state, &session).await?;
    cart.remove_item(&RecordId::from(form.id.as_str()))?;

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = session_cart(&state, &session).await?;
    cart.clear()?;

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_cart_line_view_formatting() {
        let item = CartLineItem {
            id: RecordId::from(5),
            slug: "impact-wrench".to_string(),
            name: "Impact Wrench".to_string(),
            price: Decimal::new(1050, 2),
            quantity: 3,
            sku: None,
            vendor_id: None,
            category_id: None,
        };

        let view = CartLineView::from(&item);
        assert_eq!(view.id, "5");
        assert_eq!(view.price, "10.50");
        assert_eq!(view.line_total, "31.50");
    }
}
