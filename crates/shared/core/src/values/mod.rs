use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Per-unit execution price - uses Decimal for precision
pub type Price = Decimal;

/// Number of units traded - uses Decimal for precision
pub type Quantity = Decimal;

/// Total consideration of a trade
pub type Amount = Decimal;

/// Calendar date on which a trade executed (no time of day)
pub type TradeDate = NaiveDate;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Storage-assigned trade identifier
pub type TradeId = i64;

/// Identity of the submitting user (their e-mail address)
pub type Reporter = String;
