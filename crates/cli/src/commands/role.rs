//! Role management command.

use std::str::FromStr;

use tangerine_core::{Role, UserId};

use super::CommandError;

/// Set a user's role by email.
///
/// # Errors
///
/// Returns `CommandError::Invalid` if the role name is unknown or no user
/// has the given email. Returns `CommandError::Database` for query failures.
pub async fn set(email: &str, role: &str) -> Result<(), CommandError> {
    let role = Role::from_str(role).map_err(|e| CommandError::Invalid(e.to_string()))?;

    let pool = super::connect().await?;

    let user_id: Option<UserId> = sqlx::query_scalar(
        r"
        SELECT id
        FROM users
        WHERE email = $1
        ",
    )
    .bind(email)
    .fetch_optional(&pool)
    .await?;

    let Some(user_id) = user_id else {
        return Err(CommandError::Invalid(format!("No user with email {email}")));
    };

    sqlx::query(
        r"
        INSERT INTO profiles (user_id, role)
        VALUES ($1, $2)
        ON CONFLICT (user_id)
        DO UPDATE SET role = EXCLUDED.role, updated_at = now()
        ",
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(&pool)
    .await?;

    tracing::info!(email, role = role.as_str(), "Role updated");
    Ok(())
}
