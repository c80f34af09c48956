//! Business logic services for the storefront.

pub mod auth;
pub mod authz;
pub mod events;
