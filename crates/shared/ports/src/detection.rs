use tcm_core::{ClosedPosition, Trade, ViolationOutcome};

use crate::error::MatchingResult;

/// Port for holding-period violation detection
///
/// Implementations are pure: they read the supplied trade snapshot, keep no
/// state between calls and may be shared across threads.
pub trait ViolationDetector: Send + Sync {
    /// Pair buy and sell lots of a single reporter's trades
    ///
    /// Returns every closed position, violating or not, in creation order.
    fn closed_positions(&self, trades: &[Trade]) -> MatchingResult<Vec<ClosedPosition>>;

    /// Find the closed positions breaching the holding-period rule
    fn find_violations(&self, trades: &[Trade]) -> MatchingResult<ViolationOutcome>;

    /// Get the name of the detector
    fn name(&self) -> &str;
}
