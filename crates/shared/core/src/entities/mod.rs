mod direction;
mod paper_trail;
mod position;
mod trade;
mod violation;

pub use direction::Direction;
pub use paper_trail::TradePaperTrail;
pub use position::ClosedPosition;
pub use trade::{Trade, TradeDetails};
pub use violation::{
    DurationBucket, InstrumentViolations, ReporterViolations, TradePair, ViolationOutcome,
    ViolationReport,
};
