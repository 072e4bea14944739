use async_trait::async_trait;
use tcm_core::{Timestamp, Trade, TradeDetails, TradeId, TradePaperTrail};

/// Repository for reported trades and their paper trail
///
/// Listings are ordered by trade date ascending, ties by id, which is the
/// order the violation detector expects.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Store a new trade, assigning the next id
    async fn insert(&self, details: TradeDetails, reporter: &str, reported_at: Timestamp)
    -> Trade;

    /// Get a trade by ID
    async fn get(&self, id: TradeId) -> Option<Trade>;

    /// Trades reported by one reporter
    async fn list_by_reporter(&self, reporter: &str) -> Vec<Trade>;

    /// Every reported trade
    async fn list(&self) -> Vec<Trade>;

    /// Overwrite an existing trade
    async fn save(&self, trade: Trade);

    /// Remove a trade, returning it if it existed
    async fn remove(&self, id: TradeId) -> Option<Trade>;

    /// Keep the current state of `trade` before it is amended or removed
    async fn record_trail(&self, trade: &Trade, trailed_at: Timestamp) -> TradePaperTrail;

    /// Paper trail of one trade, oldest first
    async fn paper_trail(&self, trade_id: TradeId) -> Vec<TradePaperTrail>;
}
