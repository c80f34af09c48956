//! User roles and the capabilities they grant.
//!
//! Roles are stored as a denormalized attribute on the `profiles` table; the
//! storefront resolves them once per session into a [`Capabilities`] set
//! instead of refetching the role on every view.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error parsing a role string from the database.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

/// The role attribute attached to a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper. The default for new signups.
    #[default]
    Customer,
    /// Store administrator; may manage the product catalog.
    Admin,
}

impl Role {
    /// Stable string form, used for storage and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// The capability set derived from a role.
///
/// Resolved once per session and cached; invalidated on identity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// May create, update, and delete catalog products.
    pub manage_products: bool,
}

impl Capabilities {
    /// Capabilities granted to a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Customer => Self {
                manage_products: false,
            },
            Role::Admin => Self {
                manage_products: true,
            },
        }
    }

    /// The empty capability set, used for anonymous visitors.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            manage_products: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Customer, Role::Admin] {
            let parsed: Role = role.as_str().parse().expect("parse role");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_capabilities() {
        assert!(Capabilities::for_role(Role::Admin).manage_products);
        assert!(!Capabilities::for_role(Role::Customer).manage_products);
        assert!(!Capabilities::none().manage_products);
    }
}
