//! Integration tests for Tangerine Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tangerine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - End-to-end cart aggregator scenarios
//! - `cart_persistence` - Snapshot capture/restore behavior
//! - `auth_policies` - Password and role policy checks
//!
//! Tests in this crate exercise the crates' public APIs without a running
//! server or database; the database-backed paths are covered by the
//! repository layer against a live `PostgreSQL` in CI.
