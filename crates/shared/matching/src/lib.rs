//! Holding-Period Violation Detection
//!
//! Pairs a reporter's buy and sell trades first-in-first-out per instrument and
//! reports the closed positions that were both profitable and held for less
//! than the holding period.
//!
//! The work is split into three stages:
//!
//! 1. `lot`: partition trades by ISIN into date-ordered buy and sell queues
//! 2. `fifo`: greedily match queue heads into closed positions
//! 3. `rule`: keep the positions breaching the holding-period rule
//!
//! [`FifoViolationDetector`] runs all three and shapes the report.

mod detector;
mod fifo;
mod lot;
mod rule;

pub use detector::FifoViolationDetector;
pub use rule::{DEFAULT_HOLDING_PERIOD_DAYS, HoldingPeriodRule};

// Re-export the trait from ports for convenience
pub use tcm_ports::{MatchingError, MatchingResult, ViolationDetector};
