//! Cart route handlers.
//!
//! Every handler works in both modes: signed-out requests mutate the session
//! cart, signed-in requests mutate the account cart rows. The split lives
//! here so the aggregator and the repositories stay mode-agnostic.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tangerine_core::{Cart, LineKey, NewLineItem, ProductId};
use tower_sessions::Session;

use crate::cart::{CartView, load_account_cart, load_session_cart, save_session_cart};
use crate::db::cart_items::CartItemRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Request body for POST /cart/add.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: ProductId,
    /// Defaults to 1 when absent or zero.
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Request body for POST /cart/update.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Request body for POST /cart/adjust.
#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    pub product_id: ProductId,
    /// Signed step, typically +1 or -1.
    pub delta: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Request body for POST /cart/remove.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Response body for GET /cart/count.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u32,
}

fn line_key(product_id: ProductId, size: Option<String>, color: Option<String>) -> LineKey {
    LineKey {
        id: product_id,
        size,
        color,
    }
}

/// Load whichever cart applies to this request.
async fn load_cart(state: &AppState, session: &Session, auth: &OptionalAuth) -> Result<Cart> {
    match &auth.0 {
        Some(user) => load_account_cart(state.pool(), user.id).await,
        None => load_session_cart(session).await,
    }
}

/// Look up the catalog fields a new line denormalizes at add time.
async fn candidate_from_catalog(state: &AppState, form: &AddForm) -> Result<NewLineItem> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(form.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No product with id {}", form.product_id)))?;

    Ok(NewLineItem {
        id: product.id,
        name: product.name,
        price: product.price,
        image: product.image,
        size: form.size.clone(),
        color: form.color.clone(),
    })
}

/// GET /cart - cart contents with recomputed totals.
pub async fn show(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
) -> Result<Json<CartView>> {
    let cart = load_cart(&state, &session, &auth).await?;
    Ok(Json(CartView::from(&cart)))
}

/// GET /cart/count - total unit count for the badge.
pub async fn count(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
) -> Result<Json<CountResponse>> {
    let cart = load_cart(&state, &session, &auth).await?;
    Ok(Json(CountResponse {
        count: cart.item_count(),
    }))
}

/// POST /cart/add - add a line, merging quantities on identity-key match.
pub async fn add(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
    Json(form): Json<AddForm>,
) -> Result<Json<CartView>> {
    let candidate = candidate_from_catalog(&state, &form).await?;

    match &auth.0 {
        Some(user) => {
            let quantity = match form.quantity {
                Some(q) if q > 0 => q,
                _ => 1,
            };
            let repo = CartItemRepository::new(state.pool());
            repo.merge_add(user.id, &candidate, quantity).await?;
            let cart = load_account_cart(state.pool(), user.id).await?;
            Ok(Json(CartView::from(&cart)))
        }
        None => {
            let mut cart = load_session_cart(&session).await?;
            cart.add(candidate, form.quantity);
            save_session_cart(&session, &cart).await?;
            Ok(Json(CartView::from(&cart)))
        }
    }
}

/// POST /cart/update - set a line's quantity directly.
///
/// A quantity below 1 rejects the whole call; use `/cart/remove` to drop a
/// line and `/cart/adjust` for clamped stepping.
pub async fn update(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
    Json(form): Json<UpdateForm>,
) -> Result<Json<CartView>> {
    if form.quantity < 1 {
        return Err(AppError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let key = line_key(form.product_id, form.size, form.color);

    match &auth.0 {
        Some(user) => {
            let repo = CartItemRepository::new(state.pool());
            repo.set_quantity(user.id, &key, form.quantity).await?;
            let cart = load_account_cart(state.pool(), user.id).await?;
            Ok(Json(CartView::from(&cart)))
        }
        None => {
            let mut cart = load_session_cart(&session).await?;
            if !cart.set_quantity(&key, form.quantity) {
                return Err(AppError::NotFound("No matching cart line".to_string()));
            }
            save_session_cart(&session, &cart).await?;
            Ok(Json(CartView::from(&cart)))
        }
    }
}

/// POST /cart/adjust - step a line's quantity, clamping at 1.
pub async fn adjust(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
    Json(form): Json<AdjustForm>,
) -> Result<Json<CartView>> {
    let key = line_key(form.product_id, form.size, form.color);

    match &auth.0 {
        Some(user) => {
            let repo = CartItemRepository::new(state.pool());
            repo.adjust(user.id, &key, form.delta).await?;
            let cart = load_account_cart(state.pool(), user.id).await?;
            Ok(Json(CartView::from(&cart)))
        }
        None => {
            let mut cart = load_session_cart(&session).await?;
            if !cart.adjust(&key, form.delta) {
                return Err(AppError::NotFound("No matching cart line".to_string()));
            }
            save_session_cart(&session, &cart).await?;
            Ok(Json(CartView::from(&cart)))
        }
    }
}

/// POST /cart/remove - drop a line. Removing an absent line is a no-op.
pub async fn remove(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
    Json(form): Json<RemoveForm>,
) -> Result<Json<CartView>> {
    let key = line_key(form.product_id, form.size, form.color);

    match &auth.0 {
        Some(user) => {
            let repo = CartItemRepository::new(state.pool());
            repo.remove(user.id, &key).await?;
            let cart = load_account_cart(state.pool(), user.id).await?;
            Ok(Json(CartView::from(&cart)))
        }
        None => {
            let mut cart = load_session_cart(&session).await?;
            cart.remove(&key);
            save_session_cart(&session, &cart).await?;
            Ok(Json(CartView::from(&cart)))
        }
    }
}
