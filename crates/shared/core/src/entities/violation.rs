//! Holding-period violation report
//!
//! Serialises to the shape reporters and compliance officers consume:
//!
//! ```text
//! { "violations": 2,
//!   "data": [                                  -- one entry per ISIN
//!     [ { "duration": 14,                      -- one entry per holding period
//!         "data": [ [ <buy trade>, <sell trade> ], ... ] } ] ] }
//! ```

use serde::Serialize;

use super::Trade;
use crate::instruments::Isin;
use crate::values::Reporter;

/// A matched (buy, sell) trade pair, serialised as a two element array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePair(pub Trade, pub Trade);

impl TradePair {
    pub fn buy(&self) -> &Trade {
        &self.0
    }

    pub fn sell(&self) -> &Trade {
        &self.1
    }
}

/// Violating pairs of one instrument sharing the same holding period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationBucket {
    /// Holding period in days
    pub duration: i64,
    pub data: Vec<TradePair>,
}

/// Duration buckets of one instrument, in ascending duration order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InstrumentViolations {
    #[serde(skip)]
    pub isin: Isin,
    pub buckets: Vec<DurationBucket>,
}

impl InstrumentViolations {
    pub fn count(&self) -> usize {
        self.buckets.iter().map(|b| b.data.len()).sum()
    }
}

/// All violations of one reporter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    /// Total number of violating pairs across all instruments
    pub violations: usize,
    pub data: Vec<InstrumentViolations>,
}

/// Result of a violation scan
///
/// `NoViolations` is distinct from an empty report: callers answer it with
/// "no content" rather than an empty payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationOutcome {
    Violations(ViolationReport),
    NoViolations,
}

impl ViolationOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, ViolationOutcome::NoViolations)
    }

    pub fn total(&self) -> usize {
        match self {
            ViolationOutcome::Violations(report) => report.violations,
            ViolationOutcome::NoViolations => 0,
        }
    }

    pub fn into_report(self) -> Option<ViolationReport> {
        match self {
            ViolationOutcome::Violations(report) => Some(report),
            ViolationOutcome::NoViolations => None,
        }
    }
}

/// Violations of one reporter in the all-reporters view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporterViolations {
    pub reporter: Reporter,
    pub data: ViolationReport,
}
