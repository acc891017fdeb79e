//! Greenridge Core - Storefront domain logic.
//!
//! This crate holds the pieces of the storefront that are pure logic:
//! the pricing schedule, the cart ledger, order assembly, and the traits
//! the checkout flow needs from its collaborators.
//!
//! # Architecture
//!
//! The core crate contains only types and computation - no I/O, no database
//! access, no HTTP clients. The `storefront` binary supplies the Postgres
//! and Telegram implementations behind the [`stores`] traits.
//!
//! # Modules
//!
//! - [`types`] - IDs, category keys, catalog items, customer contact
//! - [`pricing`] - base price to display price markup schedule
//! - [`cart`] - session-scoped cart with composite line keys
//! - [`order`] - order records, validation, totals
//! - [`stores`] - catalog / order store / notifier seams

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod pricing;
pub mod stores;
pub mod types;

pub use types::*;
