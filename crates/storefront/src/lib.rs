//! Greenridge storefront library.
//!
//! The binary in `main.rs` only does process bootstrap; everything it
//! wires together lives here so integration tests can drive the same
//! services without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
