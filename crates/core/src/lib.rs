//! CosmoGlow Core - Shared domain types.
//!
//! This crate provides the domain model used by the storefront:
//! the product catalog, the shopping cart, pricing rules, and the
//! order aggregate built at checkout time.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no
//! HTTP, no session handling. Everything here is synchronously
//! testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe identifiers
//! - [`catalog`] - The embedded product catalog and listing policies
//! - [`cart`] - The shopping cart and its persisted wire form
//! - [`pricing`] - Shipping rules and rupee formatting
//! - [`order`] - The ephemeral order aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Product, SortKey};
pub use order::{CustomerDetails, Order, OrderItem};
pub use types::ProductId;
