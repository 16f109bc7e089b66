//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! No business rules live here: handlers translate form posts into cart
//! store calls and render the outcome. A failed operation leaves the cart
//! fragment alone and retargets the response into the toast region.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rocket_shoes_core::{Brl, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::{self, CartError, CartItem, CartOp};
use crate::filters;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub amount: i32,
    pub price: String,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
}

impl From<&[CartItem]> for CartView {
    fn from(items: &[CartItem]) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            total: Brl(cart::total(items)).to_string(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            image: item.image.clone(),
            amount: item.amount,
            price: Brl(item.price).to_string(),
            subtotal: Brl(item.subtotal()).to_string(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub amount: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Toast fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub message: &'static str,
}

/// Render the cart items fragment with an update trigger.
fn cart_fragment(items: &[CartItem]) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(items),
        },
    )
        .into_response()
}

/// Render the failure notification, retargeted into the toast region.
fn toast(error: &CartError, op: CartOp) -> Response {
    tracing::warn!(error = %error, ?op, "Cart operation failed");
    (
        AppendHeaders([("HX-Retarget", "#toast"), ("HX-Reswap", "innerHTML")]),
        ToastTemplate {
            message: error.notification(op),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let items = state.cart().items().await;

    CartShowTemplate {
        cart: CartView::from(items.as_slice()),
    }
}

/// Add one unit of a product to the cart (HTMX).
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    match state
        .cart()
        .add_product(ProductId::new(form.product_id))
        .await
    {
        Ok(items) => cart_fragment(&items),
        Err(e) => toast(&e, CartOp::Add),
    }
}

/// Set a cart item's quantity (HTMX).
///
/// The page's increment and decrement controls post `amount ± 1` relative to
/// the rendered amount; the decrement control is disabled at `amount == 1`.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    match state
        .cart()
        .update_amount(ProductId::new(form.product_id), form.amount)
        .await
    {
        Ok(items) => cart_fragment(&items),
        Err(e) => toast(&e, CartOp::Update),
    }
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    match state
        .cart()
        .remove_product(ProductId::new(form.product_id))
        .await
    {
        Ok(items) => cart_fragment(&items),
        Err(e) => toast(&e, CartOp::Remove),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: i32, price: &str, amount: i32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::from_str_exact(price).unwrap(),
            image: format!("https://example.com/tenis{id}.jpg"),
            amount,
        }
    }

    #[test]
    fn test_cart_view_formats_lines_and_total() {
        let items = vec![item(1, "179.9", 2), item(2, "139.9", 1)];
        let view = CartView::from(items.as_slice());

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].price, "R$ 179,90");
        assert_eq!(view.items[0].subtotal, "R$ 359,80");
        assert_eq!(view.total, "R$ 499,70");
    }

    #[test]
    fn test_empty_cart_renders_formatted_zero() {
        let items: Vec<CartItem> = Vec::new();
        let view = CartView::from(items.as_slice());
        assert!(view.items.is_empty());
        assert_eq!(view.total, "R$ 0,00");
    }

    #[test]
    fn test_total_for_spec_example() {
        // cart = [{id: 1, price: 10.00, amount: 2}] renders 2 x 10.00
        let view = CartView::from(vec![item(1, "10.00", 2)].as_slice());
        assert_eq!(view.total, "R$ 20,00");
    }

    #[test]
    fn test_cart_items_fragment_renders_lines() {
        let template = CartItemsTemplate {
            cart: CartView::from(vec![item(1, "179.9", 2)].as_slice()),
        };
        let html = template.render().unwrap();

        assert!(html.contains("Tênis 1"));
        assert!(html.contains("R$ 359,80"));
        assert!(html.contains("value=\"1\""), "decrement posts amount - 1");
        assert!(html.contains("value=\"3\""), "increment posts amount + 1");
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_decrement_disabled_at_amount_one() {
        let template = CartItemsTemplate {
            cart: CartView::from(vec![item(1, "179.9", 1)].as_slice()),
        };
        let html = template.render().unwrap();
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_toast_renders_message() {
        let template = ToastTemplate {
            message: cart::messages::OUT_OF_STOCK,
        };
        let html = template.render().unwrap();
        assert!(html.contains("Quantidade solicitada fora de estoque"));
    }
}
