//! Tangerine Core - Shared types and cart logic.
//!
//! This crate provides the common types used across all Tangerine Market
//! components:
//! - `storefront` - Public-facing catalog, cart, and admin API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles
//! - [`cart`] - The cart aggregator: line-item merge, totals, snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartSnapshot, LineItem, LineKey, NewLineItem, SNAPSHOT_VERSION};
pub use types::*;
