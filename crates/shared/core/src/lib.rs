//! Trade Compliance Monitor Core Domain
//!
//! Pure domain types for the trade compliance monitor.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Matching output
    ClosedPosition,
    // Trade entities
    Direction,
    DurationBucket,
    InstrumentViolations,
    ReporterViolations,
    Trade,
    TradeDetails,
    TradePair,
    TradePaperTrail,
    ViolationOutcome,
    ViolationReport,
};
pub use instruments::{CurrencyCode, CurrencyError, Isin, IsinError};
pub use values::{Amount, Price, Quantity, Reporter, Timestamp, TradeDate, TradeId};
