//! User model.

use chrono::{DateTime, Utc};

use tangerine_core::{Email, UserId};

/// A registered storefront user.
#[derive(Debug, Clone)]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Email address (unique).
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}
