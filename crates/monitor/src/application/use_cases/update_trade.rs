use std::sync::Arc;
use tcm_core::{Trade, TradeId};
use tcm_ports::Clock;

use super::TradeError;
use super::query_trades::owned_trade;
use crate::application::ports::TradeRepository;
use crate::application::validation::{TradeDraft, TradeValidator};

/// Result of amending a trade
#[derive(Debug, Clone, PartialEq)]
pub enum AmendOutcome {
    /// The trade changed; previous values went to the paper trail
    Updated(Trade),
    /// The submitted values equal the stored ones
    Unchanged,
}

/// Amend a trade owned by the caller
///
/// The draft is a complete restatement of the trade and is validated like a
/// new report.
pub struct UpdateTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    clock: Arc<C>,
    trade_repo: Arc<R>,
}

impl<C, R> UpdateTradeUseCase<C, R>
where
    C: Clock,
    R: TradeRepository,
{
    pub fn new(clock: Arc<C>, trade_repo: Arc<R>) -> Self {
        Self { clock, trade_repo }
    }

    pub async fn execute(
        &self,
        reporter: &str,
        id: TradeId,
        draft: TradeDraft,
    ) -> Result<AmendOutcome, TradeError> {
        let details = TradeValidator::validate(&draft, self.clock.today())?;
        let mut trade = owned_trade(self.trade_repo.as_ref(), reporter, id).await?;

        if trade.details() == details {
            tracing::debug!(trade_id = id, "Amendment leaves trade unchanged");
            return Ok(AmendOutcome::Unchanged);
        }

        let now = self.clock.now();
        self.trade_repo.record_trail(&trade, now).await;
        trade.apply(details);
        trade.reported_at = now;
        self.trade_repo.save(trade.clone()).await;

        tracing::info!(trade_id = id, "Trade amended by {}", reporter);
        Ok(AmendOutcome::Updated(trade))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryTradeRepository;
    use rust_decimal_macros::dec;
    use tcm_clock::FixedClock;

    const ALICE: &str = "alice@example.com";

    fn draft(quantity: rust_decimal::Decimal) -> TradeDraft {
        TradeDraft {
            isin: Some("US0378331005".to_string()),
            name: Some("Apple Inc".to_string()),
            direction: Some("Buy".to_string()),
            quantity: Some(quantity),
            price: Some(dec!(365)),
            currency: Some("USD".to_string()),
            amount: None,
            date: Some("2020-01-01".to_string()),
        }
    }

    async fn setup() -> (Arc<FixedClock>, Arc<InMemoryTradeRepository>, Trade) {
        let clock = Arc::new(FixedClock::at_date(2020, 3, 1).unwrap());
        let repo = Arc::new(InMemoryTradeRepository::new());
        let details = TradeValidator::validate(&draft(dec!(100)), clock.today()).unwrap();
        let trade = repo.insert(details, ALICE, clock.now()).await;
        (clock, repo, trade)
    }

    #[tokio::test]
    async fn test_amend_trails_previous_values() {
        let (clock, repo, original) = setup().await;
        clock.advance(chrono::Duration::hours(2));
        let use_case = UpdateTradeUseCase::new(Arc::clone(&clock), Arc::clone(&repo));

        let outcome = use_case
            .execute(ALICE, original.id, draft(dec!(50)))
            .await
            .unwrap();

        let AmendOutcome::Updated(trade) = outcome else {
            panic!("expected an update");
        };
        assert_eq!(trade.quantity, dec!(50));
        assert_eq!(trade.amount, dec!(18250));
        assert_eq!(trade.reported_at, clock.now());

        let trail = repo.paper_trail(original.id).await;
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].details.quantity, dec!(100));
        assert_eq!(trail[0].reported_at, original.reported_at);
        assert_eq!(trail[0].trailed_at, trade.reported_at);
    }

    #[tokio::test]
    async fn test_identical_amend_is_unchanged() {
        let (clock, repo, original) = setup().await;
        let use_case = UpdateTradeUseCase::new(clock, Arc::clone(&repo));

        let outcome = use_case
            .execute(ALICE, original.id, draft(dec!(100)))
            .await
            .unwrap();

        assert_eq!(outcome, AmendOutcome::Unchanged);
        assert!(repo.paper_trail(original.id).await.is_empty());
        assert_eq!(repo.get(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_amend_foreign_trade_not_found() {
        let (clock, repo, original) = setup().await;
        let use_case = UpdateTradeUseCase::new(clock, repo);

        let err = use_case
            .execute("bob@example.com", original.id, draft(dec!(50)))
            .await
            .unwrap_err();
        assert!(matches!(err, TradeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_amend_rejected() {
        let (clock, repo, original) = setup().await;
        let use_case = UpdateTradeUseCase::new(clock, repo);

        let err = use_case
            .execute(ALICE, original.id, draft(dec!(0)))
            .await
            .unwrap_err();
        let TradeError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert!(errors.get("quantity").is_some());
    }
}
