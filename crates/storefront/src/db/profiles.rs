//! Profile repository: the denormalized role attribute per user.

use sqlx::PgPool;

use tangerine_core::{Role, UserId};

use super::RepositoryError;

/// Repository for profile rows.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the role for a user. A missing profile row reads as the default
    /// customer role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is unknown.
    pub async fn role(&self, user_id: UserId) -> Result<Role, RepositoryError> {
        let row = sqlx::query_as::<_, (String,)>(
            r"
            SELECT role
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some((role,)) => role.parse::<Role>().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            }),
            None => Ok(Role::Customer),
        }
    }

    /// Set the role for a user, creating the profile row if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_role(&self, user_id: UserId, role: Role) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, role)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET role = EXCLUDED.role
            ",
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
