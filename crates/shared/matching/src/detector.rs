use std::collections::BTreeMap;

use tcm_core::{
    ClosedPosition, DurationBucket, InstrumentViolations, Trade, TradePair, ViolationOutcome,
    ViolationReport,
};
use tcm_ports::{MatchingError, MatchingResult, ViolationDetector};

use crate::fifo::match_lots;
use crate::lot::partition;
use crate::rule::HoldingPeriodRule;

/// FIFO lot-matching violation detector
///
/// Matches each instrument's buy lots against its sell lots oldest first and
/// reports the closed positions that breach the [`HoldingPeriodRule`].
/// Trades are expected to belong to one reporter; mixing reporters is a
/// caller bug and aborts the scan with [`MatchingError::InvalidInput`].
#[derive(Debug, Clone, Default)]
pub struct FifoViolationDetector {
    rule: HoldingPeriodRule,
}

impl FifoViolationDetector {
    pub fn new(rule: HoldingPeriodRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> HoldingPeriodRule {
        self.rule
    }
}

fn ensure_single_reporter(trades: &[Trade]) -> MatchingResult<()> {
    if let Some((first, rest)) = trades.split_first() {
        if let Some(other) = rest.iter().find(|t| t.reporter != first.reporter) {
            return Err(MatchingError::mixed_reporters(&first.reporter, &other.reporter));
        }
    }
    Ok(())
}

impl ViolationDetector for FifoViolationDetector {
    fn name(&self) -> &str {
        "FIFO Holding Period"
    }

    fn closed_positions(&self, trades: &[Trade]) -> MatchingResult<Vec<ClosedPosition>> {
        ensure_single_reporter(trades)?;

        Ok(partition(trades)
            .into_values()
            .filter(|book| book.is_two_sided())
            .flat_map(match_lots)
            .map(|m| m.position)
            .collect())
    }

    fn find_violations(&self, trades: &[Trade]) -> MatchingResult<ViolationOutcome> {
        if trades.is_empty() {
            return Ok(ViolationOutcome::NoViolations);
        }
        ensure_single_reporter(trades)?;

        let mut total = 0;
        let mut data = Vec::new();

        for (isin, book) in partition(trades) {
            if !book.is_two_sided() {
                continue;
            }

            let mut by_duration: BTreeMap<i64, Vec<TradePair>> = BTreeMap::new();
            for m in match_lots(book) {
                if self.rule.is_violation(&m.position) {
                    by_duration
                        .entry(m.position.duration_days)
                        .or_default()
                        .push(TradePair(m.buy.clone(), m.sell.clone()));
                }
            }
            if by_duration.is_empty() {
                continue;
            }

            let violations = InstrumentViolations {
                isin: isin.clone(),
                buckets: by_duration
                    .into_iter()
                    .map(|(duration, data)| DurationBucket { duration, data })
                    .collect(),
            };
            log::debug!(
                "{}: {} holding-period violation(s)",
                isin,
                violations.count()
            );
            total += violations.count();
            data.push(violations);
        }

        if total == 0 {
            return Ok(ViolationOutcome::NoViolations);
        }
        Ok(ViolationOutcome::Violations(ViolationReport {
            violations: total,
            data,
        }))
    }
}
