//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tangerine_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// GET /products - the full catalog listing.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list_all().await?;
    Ok(Json(products))
}

/// GET /products/{id} - a single product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No product with id {id}")))?;
    Ok(Json(product))
}
