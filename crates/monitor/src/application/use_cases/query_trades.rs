use std::sync::Arc;
use tcm_core::{Trade, TradeId};

use super::TradeError;
use crate::application::ports::TradeRepository;

/// List reported trades
pub struct ListTradesUseCase<R>
where
    R: TradeRepository,
{
    trade_repo: Arc<R>,
}

impl<R> ListTradesUseCase<R>
where
    R: TradeRepository,
{
    pub fn new(trade_repo: Arc<R>) -> Self {
        Self { trade_repo }
    }

    /// Trades of one reporter, oldest trade date first
    pub async fn execute_for(&self, reporter: &str) -> Vec<Trade> {
        self.trade_repo.list_by_reporter(reporter).await
    }

    /// Trades of every reporter
    pub async fn execute_all(&self) -> Vec<Trade> {
        self.trade_repo.list().await
    }
}

/// Fetch a single trade owned by the caller
pub struct GetTradeUseCase<R>
where
    R: TradeRepository,
{
    trade_repo: Arc<R>,
}

impl<R> GetTradeUseCase<R>
where
    R: TradeRepository,
{
    pub fn new(trade_repo: Arc<R>) -> Self {
        Self { trade_repo }
    }

    pub async fn execute(&self, reporter: &str, id: TradeId) -> Result<Trade, TradeError> {
        owned_trade(self.trade_repo.as_ref(), reporter, id).await
    }
}

/// Look up a trade, hiding trades of other reporters behind `NotFound`
pub(super) async fn owned_trade<R>(
    repo: &R,
    reporter: &str,
    id: TradeId,
) -> Result<Trade, TradeError>
where
    R: TradeRepository + ?Sized,
{
    repo.get(id)
        .await
        .filter(|trade| trade.reporter == reporter)
        .ok_or(TradeError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryTradeRepository;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tcm_core::{CurrencyCode, Direction, Isin, TradeDetails};

    fn details(day: u32) -> TradeDetails {
        TradeDetails {
            isin: Isin::new("US0378331005"),
            name: "Apple Inc".to_string(),
            direction: Direction::Buy,
            quantity: dec!(10),
            price: dec!(100),
            currency: CurrencyCode::new("USD"),
            amount: dec!(1000),
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_scoped_to_reporter() {
        let repo = Arc::new(InMemoryTradeRepository::new());
        let now = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        repo.insert(details(3), "alice@example.com", now).await;
        repo.insert(details(1), "bob@example.com", now).await;
        repo.insert(details(2), "alice@example.com", now).await;

        let use_case = ListTradesUseCase::new(Arc::clone(&repo));
        let alice = use_case.execute_for("alice@example.com").await;
        assert_eq!(alice.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 1]);

        let all = use_case.execute_all().await;
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        assert!(use_case.execute_for("carol@example.com").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_hides_foreign_trades() {
        let repo = Arc::new(InMemoryTradeRepository::new());
        let now = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        let trade = repo.insert(details(3), "alice@example.com", now).await;

        let use_case = GetTradeUseCase::new(repo);
        assert_eq!(
            use_case.execute("alice@example.com", trade.id).await.unwrap(),
            trade
        );
        assert!(matches!(
            use_case.execute("bob@example.com", trade.id).await,
            Err(TradeError::NotFound(id)) if id == trade.id
        ));
        assert!(matches!(
            use_case.execute("alice@example.com", 99).await,
            Err(TradeError::NotFound(99))
        ));
    }
}
