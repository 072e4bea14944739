use std::sync::Arc;
use tcm_core::Trade;
use tcm_ports::Clock;

use super::TradeError;
use crate::application::ports::TradeRepository;
use crate::application::validation::{TradeDraft, TradeValidator};

/// Report a new trade on behalf of the authenticated reporter
pub struct ReportTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    clock: Arc<C>,
    trade_repo: Arc<R>,
}

impl<C, R> ReportTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    pub fn new(clock: Arc<C>, trade_repo: Arc<R>) -> Self {
        Self { clock, trade_repo }
    }

    pub async fn execute(&self, reporter: &str, draft: TradeDraft) -> Result<Trade, TradeError> {
        let details = TradeValidator::validate(&draft, self.clock.today())?;

        let trade = self
            .trade_repo
            .insert(details, reporter, self.clock.now())
            .await;

        tracing::info!(
            trade_id = trade.id,
            isin = %trade.isin,
            direction = %trade.direction,
            "Trade reported by {}",
            reporter
        );
        Ok(trade)
    }
}
