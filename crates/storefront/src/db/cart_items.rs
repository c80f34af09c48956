//! Server-side cart repository.
//!
//! Each signed-in user's cart is a set of rows keyed UNIQUE on
//! `(user_id, product_id, size, color)` - the same identity key the in-memory
//! aggregator merges on. Name, price, and image are denormalized at add time
//! and never refreshed by later merges.
//!
//! Merge-add is a single atomic upsert, so two rapid adds for the same line
//! serialize in the database instead of racing last-write-wins.

use sqlx::{FromRow, PgPool};

use tangerine_core::{CartItemId, LineItem, LineKey, NewLineItem, Price, ProductId, UserId};

use super::RepositoryError;

/// Variant discriminators are stored as empty strings so the uniqueness
/// constraint can include them; `None` maps to `""` at this boundary.
fn variant_to_db(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn variant_from_db(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[derive(FromRow)]
struct CartItemRow {
    #[allow(dead_code)]
    id: CartItemId,
    product_id: ProductId,
    name: String,
    price: Price,
    quantity: i32,
    image: Option<String>,
    size: String,
    color: String,
}

impl CartItemRow {
    fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.product_id,
            name: self.name,
            price: self.price,
            quantity: u32::try_from(self.quantity).unwrap_or(1),
            image: self.image,
            size: variant_from_db(self.size),
            color: variant_from_db(self.color),
        }
    }
}

/// Repository for the server-side cart rows.
pub struct CartItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the authoritative cart lines for a user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<LineItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r"
            SELECT id, product_id, name, price, quantity, image, size, color
            FROM cart_items
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItemRow::into_line_item).collect())
    }

    /// Add a candidate line, merging quantities into an existing row when the
    /// identity key matches.
    ///
    /// The upsert only touches `quantity` on conflict; the existing row's
    /// denormalized name, price, and image are retained.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn merge_add(
        &self,
        user_id: UserId,
        candidate: &NewLineItem,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO cart_items (user_id, product_id, name, price, image, size, color, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, product_id, size, color)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(user_id)
        .bind(candidate.id)
        .bind(&candidate.name)
        .bind(candidate.price)
        .bind(&candidate.image)
        .bind(variant_to_db(candidate.size.as_deref()))
        .bind(variant_to_db(candidate.color.as_deref()))
        .bind(i32::try_from(quantity).unwrap_or(i32::MAX))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Set a line's quantity directly. The caller must have rejected
    /// quantities below 1 already.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no line matches the key.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        key: &LineKey,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = $5
            WHERE user_id = $1 AND product_id = $2 AND size = $3 AND color = $4
            ",
        )
        .bind(user_id)
        .bind(key.id)
        .bind(variant_to_db(key.size.as_deref()))
        .bind(variant_to_db(key.color.as_deref()))
        .bind(i32::try_from(quantity).unwrap_or(i32::MAX))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Adjust a line's quantity by a delta, clamping at 1 inside the database
    /// so concurrent adjustments cannot drive it below.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no line matches the key.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adjust(
        &self,
        user_id: UserId,
        key: &LineKey,
        delta: i64,
    ) -> Result<(), RepositoryError> {
        let delta = i32::try_from(delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)))
            .unwrap_or_default();

        let result = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = GREATEST(1, quantity + $5)
            WHERE user_id = $1 AND product_id = $2 AND size = $3 AND color = $4
            ",
        )
        .bind(user_id)
        .bind(key.id)
        .bind(variant_to_db(key.size.as_deref()))
        .bind(variant_to_db(key.color.as_deref()))
        .bind(delta)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove the line matching the key.
    ///
    /// # Returns
    ///
    /// Returns `true` if a line was removed, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, user_id: UserId, key: &LineKey) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE user_id = $1 AND product_id = $2 AND size = $3 AND color = $4
            ",
        )
        .bind(user_id)
        .bind(key.id)
        .bind(variant_to_db(key.size.as_deref()))
        .bind(variant_to_db(key.color.as_deref()))
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_mapping() {
        assert_eq!(variant_to_db(Some("L")), "L");
        assert_eq!(variant_to_db(None), "");
        assert_eq!(variant_from_db("L".to_owned()), Some("L".to_owned()));
        assert_eq!(variant_from_db(String::new()), None);
    }
}
