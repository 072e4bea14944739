use std::path::Path;

use tcm_core::{ReporterViolations, Trade};
use tcm_matching::{FifoViolationDetector, HoldingPeriodRule};
use tcm_ports::MatchingError;
use thiserror::Error;

use super::scan_all_reporters;

/// Failures of an offline scan over a trade file
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    #[error("Failed to read trades from '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse trades: {0}")]
    Parse(String),

    #[error(transparent)]
    Detection(#[from] MatchingError),
}

/// Scan a JSON file holding an array of reported trades
pub fn scan_trade_file(
    path: impl AsRef<Path>,
    rule: HoldingPeriodRule,
) -> Result<Vec<ReporterViolations>, ScanError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ScanError::Io {
        path: path.as_ref().display().to_string(),
        error: e.to_string(),
    })?;

    scan_trades_json(&content, rule)
}

/// Scan a JSON array of reported trades, all reporters at once
///
/// Trades are put in `(date, id)` order first, the order the repository
/// lists them in.
pub fn scan_trades_json(
    json: &str,
    rule: HoldingPeriodRule,
) -> Result<Vec<ReporterViolations>, ScanError> {
    let mut trades: Vec<Trade> =
        serde_json::from_str(json).map_err(|e| ScanError::Parse(e.to_string()))?;
    trades.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    tracing::info!(
        trades = trades.len(),
        max_days = rule.max_days,
        "Scanning trade file"
    );

    Ok(scan_all_reporters(&FifoViolationDetector::new(rule), trades)?)
}
