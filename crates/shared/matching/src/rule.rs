use tcm_core::ClosedPosition;

/// Positions held for fewer days than this are short-term round trips
pub const DEFAULT_HOLDING_PERIOD_DAYS: i64 = 32;

/// Holding-period compliance rule
///
/// A closed position violates the rule when it was held for strictly fewer
/// than `max_days` days and sold strictly above its purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldingPeriodRule {
    pub max_days: i64,
}

impl HoldingPeriodRule {
    pub fn new(max_days: i64) -> Self {
        Self { max_days }
    }

    pub fn is_violation(&self, position: &ClosedPosition) -> bool {
        position.is_held_under(self.max_days) && position.is_profitable()
    }
}

impl Default for HoldingPeriodRule {
    fn default() -> Self {
        Self::new(DEFAULT_HOLDING_PERIOD_DAYS)
    }
}
