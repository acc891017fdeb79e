//! Integration tests for Greenridge.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenridge-integration-tests
//! ```
//!
//! The checkout flow tests drive `CheckoutService` end to end against
//! in-memory collaborators; the Telegram tests run the real client
//! against a wiremock server. Neither needs Postgres.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod mocks;
