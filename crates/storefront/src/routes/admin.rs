//! Admin product CRUD handlers.
//!
//! Every handler is gated by [`RequireAdmin`]; holding a session is not
//! enough, the product-management capability has to be present.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tangerine_core::{Price, ProductId};

use crate::db::products::{ProductInput, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Request body for creating or replacing a product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    /// Unit price in minor currency units.
    pub price: Price,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductForm {
    /// Validate and normalize into a repository input.
    fn into_input(self) -> Result<ProductInput> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Product name must not be empty".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(AppError::Validation(
                "Product price must not be negative".to_string(),
            ));
        }

        Ok(ProductInput {
            name,
            price: self.price,
            description: self.description.filter(|d| !d.trim().is_empty()),
            image: self.image.filter(|i| !i.trim().is_empty()),
        })
    }
}

/// GET /admin/products - the full catalog, admin view.
pub async fn list_products(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list_all().await?;
    Ok(Json(products))
}

/// POST /admin/products - create a product.
pub async fn create_product(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    let input = form.into_input()?;
    let repo = ProductRepository::new(state.pool());
    let product = repo.insert(&input).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id} - replace a product's fields.
pub async fn update_product(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>> {
    let input = form.into_input()?;
    let repo = ProductRepository::new(state.pool());
    let product = repo.update(id, &input).await?;

    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// DELETE /admin/products/{id} - delete a product.
pub async fn delete_product(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let repo = ProductRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound(format!("No product with id {id}")));
    }

    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
