use std::sync::Arc;
use tcm_core::{Trade, TradeId};
use tcm_ports::Clock;

use super::TradeError;
use super::query_trades::owned_trade;
use crate::application::ports::TradeRepository;

/// Delete a trade owned by the caller, keeping its last state in the paper trail
pub struct DeleteTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    clock: Arc<C>,
    trade_repo: Arc<R>,
}

impl<C, R> DeleteTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    pub fn new(clock: Arc<C>, trade_repo: Arc<R>) -> Self {
        Self { clock, trade_repo }
    }

    pub async fn execute(&self, reporter: &str, id: TradeId) -> Result<Trade, TradeError> {
        let trade = owned_trade(self.trade_repo.as_ref(), reporter, id).await?;

        self.trade_repo.record_trail(&trade, self.clock.now()).await;
        let removed = self
            .trade_repo
            .remove(id)
            .await
            .ok_or(TradeError::NotFound(id))?;

        tracing::info!(trade_id = id, "Trade deleted by {}", reporter);
        Ok(removed)
    }
}
