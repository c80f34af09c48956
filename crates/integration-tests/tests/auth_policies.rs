//! Authentication and authorization policy checks.
//!
//! Exercises the password rules, email parsing, and role-to-capability
//! mapping through the storefront's public API.

use std::str::FromStr;

use tangerine_core::{Capabilities, Email, Role};
use tangerine_storefront::services::auth::{hash_password, validate_password, verify_password};

// =============================================================================
// Password Policy
// =============================================================================

#[test]
fn test_short_passwords_rejected() {
    assert!(validate_password("hunter2").is_err());
    assert!(validate_password("").is_err());
}

#[test]
fn test_adequate_passwords_accepted() {
    assert!(validate_password("correct horse battery staple").is_ok());
    assert!(validate_password("12345678").is_ok());
}

#[test]
fn test_hash_and_verify_round_trip() {
    let hash = hash_password("a decent passphrase").unwrap();
    assert!(verify_password("a decent passphrase", &hash).is_ok());
    assert!(verify_password("a wrong passphrase", &hash).is_err());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("same input").unwrap();
    let second = hash_password("same input").unwrap();
    assert_ne!(first, second);
}

// =============================================================================
// Email Parsing
// =============================================================================

#[test]
fn test_email_parsing() {
    assert!(Email::parse("shopper@example.com").is_ok());
    assert!(Email::parse("no-at-sign").is_err());
    assert!(Email::parse("@example.com").is_err());
    assert!(Email::parse("shopper@").is_err());
    assert!(Email::parse("").is_err());
}

// =============================================================================
// Role Capabilities
// =============================================================================

#[test]
fn test_customer_cannot_manage_products() {
    let caps = Capabilities::for_role(Role::Customer);
    assert!(!caps.manage_products);
}

#[test]
fn test_admin_can_manage_products() {
    let caps = Capabilities::for_role(Role::Admin);
    assert!(caps.manage_products);
}

#[test]
fn test_role_names_round_trip() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
    assert_eq!(Role::Admin.as_str(), "admin");
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_default_role_is_customer() {
    assert_eq!(Role::default(), Role::Customer);
}
