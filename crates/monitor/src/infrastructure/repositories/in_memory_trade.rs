use crate::application::ports::TradeRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tcm_core::{Timestamp, Trade, TradeDetails, TradeId, TradePaperTrail};

/// In-memory trade repository
///
/// Thread-safe storage for trades using DashMap, with an append-only
/// paper trail. Ids start at 1 and are never reused.
pub struct InMemoryTradeRepository {
    trades: Arc<DashMap<TradeId, Trade>>,
    trails: Arc<RwLock<Vec<TradePaperTrail>>>,
    next_trade_id: Arc<AtomicI64>,
    next_trail_id: Arc<AtomicI64>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self {
            trades: Arc::new(DashMap::new()),
            trails: Arc::new(RwLock::new(Vec::new())),
            next_trade_id: Arc::new(AtomicI64::new(1)),
            next_trail_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn sorted(mut trades: Vec<Trade>) -> Vec<Trade> {
        trades.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        trades
    }
}

impl Default for InMemoryTradeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTradeRepository {
    fn clone(&self) -> Self {
        Self {
            trades: Arc::clone(&self.trades),
            trails: Arc::clone(&self.trails),
            next_trade_id: Arc::clone(&self.next_trade_id),
            next_trail_id: Arc::clone(&self.next_trail_id),
        }
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn insert(
        &self,
        details: TradeDetails,
        reporter: &str,
        reported_at: Timestamp,
    ) -> Trade {
        let id = self.next_trade_id.fetch_add(1, Ordering::SeqCst);
        let trade = Trade::new(id, details, reporter, reported_at);
        self.trades.insert(id, trade.clone());
        trade
    }

    async fn get(&self, id: TradeId) -> Option<Trade> {
        self.trades.get(&id).map(|t| t.value().clone())
    }

    async fn list_by_reporter(&self, reporter: &str) -> Vec<Trade> {
        Self::sorted(
            self.trades
                .iter()
                .filter(|e| e.value().reporter == reporter)
                .map(|e| e.value().clone())
                .collect(),
        )
    }

    async fn list(&self) -> Vec<Trade> {
        Self::sorted(self.trades.iter().map(|e| e.value().clone()).collect())
    }

    async fn save(&self, trade: Trade) {
        self.trades.insert(trade.id, trade);
    }

    async fn remove(&self, id: TradeId) -> Option<Trade> {
        self.trades.remove(&id).map(|(_, trade)| trade)
    }

    async fn record_trail(&self, trade: &Trade, trailed_at: Timestamp) -> TradePaperTrail {
        let id = self.next_trail_id.fetch_add(1, Ordering::SeqCst);
        let trail = TradePaperTrail::of(id, trade, trailed_at);
        self.trails.write().push(trail.clone());
        trail
    }

    async fn paper_trail(&self, trade_id: TradeId) -> Vec<TradePaperTrail> {
        self.trails
            .read()
            .iter()
            .filter(|t| t.trade_id == trade_id)
            .cloned()
            .collect()
    }
}
