use serde::{Deserialize, Serialize};

use super::{Trade, TradeDetails};
use crate::values::{Reporter, Timestamp, TradeId};

/// Previous state of a trade, kept whenever it is amended or deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePaperTrail {
    pub id: i64,
    pub trade_id: TradeId,
    #[serde(flatten)]
    pub details: TradeDetails,
    pub reporter: Reporter,
    pub reported_at: Timestamp,
    pub trailed_at: Timestamp,
}

impl TradePaperTrail {
    /// Capture `trade` as it stands before it is amended or removed
    pub fn of(id: i64, trade: &Trade, trailed_at: Timestamp) -> Self {
        Self {
            id,
            trade_id: trade.id,
            details: trade.details(),
            reporter: trade.reporter.clone(),
            reported_at: trade.reported_at,
            trailed_at,
        }
    }
}
