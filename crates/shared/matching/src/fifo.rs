use std::cmp::Ordering;

use tcm_core::{ClosedPosition, Trade};

use crate::lot::InstrumentBook;

/// A closed position together with the trades it was cut from
#[derive(Debug, Clone)]
pub(crate) struct LotMatch<'a> {
    pub buy: &'a Trade,
    pub sell: &'a Trade,
    pub position: ClosedPosition,
}

/// Greedy FIFO matching of one instrument's queues
///
/// Each step pairs the oldest buy lot with the oldest sell lot and closes the
/// smaller of the two (both when equal). The other lot stays at the front of
/// its queue with the matched quantity taken off. Every step retires at least
/// one lot, so the loop runs at most `buys + sells` times.
pub(crate) fn match_lots(mut book: InstrumentBook<'_>) -> Vec<LotMatch<'_>> {
    let mut matches = Vec::with_capacity(book.buys.len().max(book.sells.len()));

    while let (Some(buy), Some(sell)) = (book.buys.front_mut(), book.sells.front_mut()) {
        let matched_quantity = buy.remaining.min(sell.remaining);
        let duration_days = (buy.trade.date - sell.trade.date).num_days().abs();

        log::trace!(
            "{}: closed {} (buy #{} / sell #{}) after {} days",
            buy.trade.isin,
            matched_quantity,
            buy.trade.id,
            sell.trade.id,
            duration_days
        );

        matches.push(LotMatch {
            buy: buy.trade,
            sell: sell.trade,
            position: ClosedPosition {
                buy_trade_id: buy.trade.id,
                sell_trade_id: sell.trade.id,
                matched_quantity,
                duration_days,
                buy_price: buy.trade.price,
                sell_price: sell.trade.price,
            },
        });

        match buy.remaining.cmp(&sell.remaining) {
            Ordering::Equal => {
                book.buys.pop_front();
                book.sells.pop_front();
            }
            Ordering::Greater => {
                buy.remaining -= matched_quantity;
                book.sells.pop_front();
            }
            Ordering::Less => {
                sell.remaining -= matched_quantity;
                book.buys.pop_front();
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::partition;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tcm_core::{CurrencyCode, Direction, Isin, TradeDetails};

    fn trade(id: i64, direction: Direction, quantity: Decimal, date: &str) -> Trade {
        Trade::new(
            id,
            TradeDetails {
                isin: Isin::new("US0378331005"),
                name: "Apple Inc".to_string(),
                direction,
                quantity,
                price: dec!(100),
                currency: CurrencyCode::new("USD"),
                amount: quantity * dec!(100),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            },
            "john.doe@example.com",
            Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
        )
    }

    fn run(trades: &[Trade]) -> Vec<ClosedPosition> {
        partition(trades)
            .into_values()
            .flat_map(match_lots)
            .map(|m| m.position)
            .collect()
    }

    #[test]
    fn test_equal_lots_close_together() {
        let trades = vec![
            trade(1, Direction::Buy, dec!(100), "2020-01-01"),
            trade(2, Direction::Sell, dec!(100), "2020-01-15"),
        ];
        let positions = run(&trades);

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].matched_quantity, dec!(100));
        assert_eq!(positions[0].duration_days, 14);
    }

    #[test]
    fn test_buy_lot_carries_over_across_sells() {
        let trades = vec![
            trade(1, Direction::Buy, dec!(100), "2020-01-01"),
            trade(2, Direction::Sell, dec!(30), "2020-01-02"),
            trade(3, Direction::Sell, dec!(30), "2020-01-03"),
            trade(4, Direction::Sell, dec!(50), "2020-01-04"),
        ];
        let positions = run(&trades);

        let pairs: Vec<(i64, i64, Decimal)> = positions
            .iter()
            .map(|p| (p.buy_trade_id, p.sell_trade_id, p.matched_quantity))
            .collect();
        // The last 10 units of the final sell have no buy lot left
        assert_eq!(
            pairs,
            vec![(1, 2, dec!(30)), (1, 3, dec!(30)), (1, 4, dec!(40))]
        );
    }

    #[test]
    fn test_sell_lot_carries_over_across_buys() {
        let trades = vec![
            trade(1, Direction::Buy, dec!(50), "2020-01-01"),
            trade(2, Direction::Buy, dec!(50), "2020-01-02"),
            trade(3, Direction::Sell, dec!(100), "2020-01-11"),
        ];
        let positions = run(&trades);

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].duration_days, 10);
        assert_eq!(positions[1].duration_days, 9);
        assert!(positions.iter().all(|p| p.matched_quantity == dec!(50)));
    }

    #[test]
    fn test_fractional_quantities_match_exactly() {
        let trades = vec![
            trade(1, Direction::Buy, dec!(0.1), "2020-01-01"),
            trade(2, Direction::Buy, dec!(0.2), "2020-01-01"),
            trade(3, Direction::Sell, dec!(0.3), "2020-01-02"),
            trade(4, Direction::Buy, dec!(1), "2020-01-03"),
            trade(5, Direction::Sell, dec!(1), "2020-01-04"),
        ];
        let positions = run(&trades);

        // 0.1 + 0.2 consumes the 0.3 sell exactly, leaving nothing behind
        let pairs: Vec<(i64, i64)> = positions
            .iter()
            .map(|p| (p.buy_trade_id, p.sell_trade_id))
            .collect();
        assert_eq!(pairs, vec![(1, 3), (2, 3), (4, 5)]);
    }

    #[test]
    fn test_sell_before_buy_uses_absolute_duration() {
        let trades = vec![
            trade(1, Direction::Sell, dec!(10), "2020-01-01"),
            trade(2, Direction::Buy, dec!(10), "2020-01-21"),
        ];
        let positions = run(&trades);

        assert_eq!(positions[0].duration_days, 20);
    }

    #[test]
    fn test_one_sided_book_produces_nothing() {
        let trades = vec![
            trade(1, Direction::Buy, dec!(10), "2020-01-01"),
            trade(2, Direction::Buy, dec!(10), "2020-01-02"),
        ];
        assert!(run(&trades).is_empty());
    }
}
