//! Instrument and currency identifiers
//!
//! - ISIN (International Securities Identification Number)
//! - ISO 4217 style three letter currency codes

mod currency;
mod isin;

pub use currency::{CurrencyCode, CurrencyError};
pub use isin::{Isin, IsinError};
