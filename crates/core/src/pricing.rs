//! Display-price markup schedule.
//!
//! Customers never see stored base prices; every price that leaves the
//! system goes through [`display_price`] first. The markup tiers:
//!
//! | base price        | display price |
//! |-------------------|---------------|
//! | `< 10`            | `base × 2`    |
//! | `10 ..= 40`       | `base + 20`   |
//! | `41 ..= 100`      | `base + 30`   |
//! | `101 ..= 200`     | `base + 40`   |
//! | `201 ..= 300`     | `base + 50`   |
//! | `301 ..= 500`     | `base + 100`  |
//! | anything else     | `base + 300`  |
//!
//! Both bounds of each tier are checked, so fractional prices between
//! consecutive tiers (40.5, 100.2, 300.01, ...) match no bounded tier and
//! take the final `+300` arm. The table above is authoritative, gaps
//! included; pricing must not be "smoothed" without a business decision.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected base price.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("base price cannot be negative: {base}")]
pub struct InvalidPriceError {
    pub base: Decimal,
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Computes the customer-facing price for a stored base price.
///
/// Pure and side-effect free; safe to call concurrently from any number
/// of request handlers.
///
/// # Errors
///
/// Returns [`InvalidPriceError`] when `base` is negative. Stored prices
/// are validated on ingest, so a negative here means corrupt data.
pub fn display_price(base: Decimal) -> Result<Decimal, InvalidPriceError> {
    if base < Decimal::ZERO {
        return Err(InvalidPriceError { base });
    }
    let display = if base < dec(10) {
        base * Decimal::TWO
    } else if (dec(10)..=dec(40)).contains(&base) {
        base + dec(20)
    } else if (dec(41)..=dec(100)).contains(&base) {
        base + dec(30)
    } else if (dec(101)..=dec(200)).contains(&base) {
        base + dec(40)
    } else if (dec(201)..=dec(300)).contains(&base) {
        base + dec(50)
    } else if (dec(301)..=dec(500)).contains(&base) {
        base + dec(100)
    } else {
        base + dec(300)
    };
    Ok(display)
}
