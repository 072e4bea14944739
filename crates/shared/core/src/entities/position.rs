use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity, TradeId};

/// One buy lot matched against one sell lot of the same instrument
///
/// `matched_quantity` can be less than either trade's quantity when a lot was
/// only partially consumed. `duration_days` is the absolute distance between
/// the two trade dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedPosition {
    pub buy_trade_id: TradeId,
    pub sell_trade_id: TradeId,
    pub matched_quantity: Quantity,
    pub duration_days: i64,
    pub buy_price: Price,
    pub sell_price: Price,
}

impl ClosedPosition {
    /// Sold strictly above the purchase price
    pub fn is_profitable(&self) -> bool {
        self.buy_price < self.sell_price
    }

    /// Held for fewer than `max_days` days
    pub fn is_held_under(&self, max_days: i64) -> bool {
        self.duration_days < max_days
    }
}
