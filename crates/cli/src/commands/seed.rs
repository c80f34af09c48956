//! Catalog seeding command.

use tangerine_core::Price;

use super::CommandError;

/// Sample products inserted by `tangerine-cli seed`.
const SAMPLE_PRODUCTS: &[(&str, i64, &str)] = &[
    (
        "Linen shirt",
        4500,
        "Relaxed-fit shirt in washed linen.",
    ),
    (
        "Canvas tote",
        1200,
        "Heavyweight cotton canvas tote bag.",
    ),
    (
        "Ceramic mug",
        1800,
        "Hand-glazed stoneware mug, 350 ml.",
    ),
    (
        "Wool beanie",
        2200,
        "Ribbed merino wool beanie.",
    ),
];

/// Insert the sample catalog. Skips products whose name already exists, so
/// reseeding is safe.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    for (name, price_minor, description) in SAMPLE_PRODUCTS {
        let price = Price::from_minor_units(*price_minor);
        let result = sqlx::query(
            r"
            INSERT INTO products (name, price, description)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(name, "Seeded product");
        } else {
            tracing::info!(name, "Product already present, skipped");
        }
    }

    tracing::info!("Seeding complete");
    Ok(())
}
