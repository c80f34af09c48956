//! Cart persistence glue.
//!
//! Two homes for a cart: signed-out visitors keep a versioned snapshot in
//! their session, signed-in users keep rows in `cart_items`. Handlers load
//! whichever applies, mutate through [`tangerine_core::Cart`], and write the
//! result back. On sign-in the session cart is merged into the account cart
//! and the session slot is cleared.

use serde::Serialize;
use sqlx::PgPool;
use tangerine_core::{Cart, CartSnapshot, LineItem, Price, UserId};
use tower_sessions::Session;

use crate::db::cart_items::CartItemRepository;
use crate::error::Result;
use crate::models::session_keys;

/// Load the visitor cart from the session, or an empty cart if none is
/// stored or the stored snapshot is from an unknown format version.
pub async fn load_session_cart(session: &Session) -> Result<Cart> {
    let snapshot: Option<CartSnapshot> = session.get(session_keys::CART).await?;
    Ok(snapshot.map(CartSnapshot::restore).unwrap_or_default())
}

/// Write the visitor cart back to the session.
pub async fn save_session_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, CartSnapshot::capture(cart))
        .await?;
    Ok(())
}

/// Load the account cart for a signed-in user.
pub async fn load_account_cart(pool: &PgPool, user_id: UserId) -> Result<Cart> {
    let repo = CartItemRepository::new(pool);
    let lines = repo.lines_for_user(user_id).await?;
    Ok(lines.into_iter().collect())
}

/// Fold the visitor's session cart into their account cart, then clear the
/// session slot. Quantities of matching lines add together; unmatched lines
/// carry over as-is.
pub async fn merge_session_cart_into_account(
    session: &Session,
    pool: &PgPool,
    user_id: UserId,
) -> Result<()> {
    let guest = load_session_cart(session).await?;
    if !guest.is_empty() {
        let repo = CartItemRepository::new(pool);
        for item in guest.into_items() {
            let quantity = item.quantity;
            repo.merge_add(user_id, &item.into(), quantity).await?;
        }
    }
    session.remove::<CartSnapshot>(session_keys::CART).await?;
    Ok(())
}

/// Serialized view of a single cart line.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: tangerine_core::ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Line total, price times quantity.
    pub line_total: Price,
}

/// Serialized view of the whole cart.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Sum of all line totals.
    pub subtotal: Price,
    /// Sum of all line quantities.
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            items: cart.items().iter().map(CartLineView::from).collect(),
        }
    }
}

impl From<&LineItem> for CartLineView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            image: item.image.clone(),
            size: item.size.clone(),
            color: item.color.clone(),
            line_total: item.price.saturating_mul_quantity(item.quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangerine_core::{NewLineItem, ProductId};

    fn sample_cart() -> Cart {
        let mut cart = Cart::default();
        cart.add(
            NewLineItem {
                id: ProductId::new(1),
                name: "Linen shirt".to_string(),
                price: Price::from_minor_units(4500),
                image: None,
                size: Some("M".to_string()),
                color: None,
            },
            Some(2),
        );
        cart.add(
            NewLineItem {
                id: ProductId::new(2),
                name: "Canvas tote".to_string(),
                price: Price::from_minor_units(1200),
                image: None,
                size: None,
                color: None,
            },
            None,
        );
        cart
    }

    #[test]
    fn test_view_totals() {
        let cart = sample_cart();
        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, Price::from_minor_units(10_200));
        assert_eq!(view.items[0].line_total, Price::from_minor_units(9000));
    }
}
