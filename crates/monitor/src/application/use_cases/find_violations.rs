use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use tcm_core::{ReporterViolations, Trade, ViolationOutcome};
use tcm_ports::{MatchingResult, ViolationDetector};

use crate::application::ports::TradeRepository;

/// Holding-period violations of the caller
pub struct FindViolationsUseCase<R, D>
where
    R: TradeRepository,
    D: ViolationDetector,
{
    trade_repo: Arc<R>,
    detector: Arc<D>,
}

impl<R, D> FindViolationsUseCase<R, D>
where
    R: TradeRepository,
    D: ViolationDetector,
{
    pub fn new(trade_repo: Arc<R>, detector: Arc<D>) -> Self {
        Self {
            trade_repo,
            detector,
        }
    }

    pub async fn execute(&self, reporter: &str) -> MatchingResult<ViolationOutcome> {
        let trades = self.trade_repo.list_by_reporter(reporter).await;
        let outcome = self.detector.find_violations(&trades)?;

        tracing::debug!(
            detector = self.detector.name(),
            trades = trades.len(),
            violations = outcome.total(),
            "Scanned trades of {}",
            reporter
        );
        Ok(outcome)
    }
}

/// Holding-period violations of every reporter
pub struct FindAllViolationsUseCase<R, D>
where
    R: TradeRepository,
    D: ViolationDetector,
{
    trade_repo: Arc<R>,
    detector: Arc<D>,
}

impl<R, D> FindAllViolationsUseCase<R, D>
where
    R: TradeRepository,
    D: ViolationDetector,
{
    pub fn new(trade_repo: Arc<R>, detector: Arc<D>) -> Self {
        Self {
            trade_repo,
            detector,
        }
    }

    pub async fn execute(&self) -> MatchingResult<Vec<ReporterViolations>> {
        let trades = self.trade_repo.list().await;
        let found = scan_all_reporters(self.detector.as_ref(), trades)?;

        tracing::debug!(
            detector = self.detector.name(),
            reporters = found.len(),
            "Scanned trades of all reporters"
        );
        Ok(found)
    }
}

/// Run the detector once per reporter, in parallel
///
/// Trades keep their relative order within each reporter. Reporters without
/// violations are left out; the result is sorted by reporter. Any detection
/// error fails the whole scan.
pub fn scan_all_reporters<D>(
    detector: &D,
    trades: Vec<Trade>,
) -> MatchingResult<Vec<ReporterViolations>>
where
    D: ViolationDetector + ?Sized,
{
    let mut by_reporter: BTreeMap<String, Vec<Trade>> = BTreeMap::new();
    for trade in trades {
        by_reporter
            .entry(trade.reporter.clone())
            .or_default()
            .push(trade);
    }

    let scanned: Vec<(String, ViolationOutcome)> = by_reporter
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(reporter, trades)| {
            detector
                .find_violations(&trades)
                .map(|outcome| (reporter, outcome))
        })
        .collect::<MatchingResult<_>>()?;

    Ok(scanned
        .into_iter()
        .filter_map(|(reporter, outcome)| {
            outcome
                .into_report()
                .map(|data| ReporterViolations { reporter, data })
        })
        .collect())
}
