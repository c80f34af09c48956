//! Catalog product model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use tangerine_core::{Price, ProductId};

/// A catalog product row.
///
/// `price` is stored in minor currency units (`BIGINT`); display formatting
/// is the client's concern.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Database ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: Price,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional display image URL.
    pub image: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last modified.
    pub updated_at: DateTime<Utc>,
}
