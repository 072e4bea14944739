use std::collections::{BTreeMap, VecDeque};

use tcm_core::{Direction, Isin, Quantity, Trade};

/// Unmatched remainder of one trade
///
/// `remaining` starts at the trade's quantity and only ever shrinks; a lot is
/// dropped from its queue the moment it reaches zero.
#[derive(Debug, Clone)]
pub(crate) struct Lot<'a> {
    pub trade: &'a Trade,
    pub remaining: Quantity,
}

impl<'a> Lot<'a> {
    fn new(trade: &'a Trade) -> Self {
        Self {
            trade,
            remaining: trade.quantity,
        }
    }
}

/// Buy and sell queues of one instrument, oldest lot at the front
#[derive(Debug, Default)]
pub(crate) struct InstrumentBook<'a> {
    pub buys: VecDeque<Lot<'a>>,
    pub sells: VecDeque<Lot<'a>>,
}

impl<'a> InstrumentBook<'a> {
    fn push(&mut self, trade: &'a Trade) {
        match trade.direction {
            Direction::Buy => self.buys.push_back(Lot::new(trade)),
            Direction::Sell => self.sells.push_back(Lot::new(trade)),
        }
    }

    /// Only instruments traded in both directions can close positions
    pub fn is_two_sided(&self) -> bool {
        !self.buys.is_empty() && !self.sells.is_empty()
    }

    /// Stable sort by trade date, so same-day lots keep their input order
    fn sort_by_date(&mut self) {
        self.buys.make_contiguous().sort_by_key(|lot| lot.trade.date);
        self.sells.make_contiguous().sort_by_key(|lot| lot.trade.date);
    }
}

/// Group trades by ISIN (in ISIN order) and split each group by direction
pub(crate) fn partition(trades: &[Trade]) -> BTreeMap<&Isin, InstrumentBook<'_>> {
    let mut books: BTreeMap<&Isin, InstrumentBook<'_>> = BTreeMap::new();
    for trade in trades {
        books.entry(&trade.isin).or_default().push(trade);
    }
    for book in books.values_mut() {
        book.sort_by_date();
    }
    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tcm_core::{CurrencyCode, TradeDetails};

    fn trade(id: i64, isin: &str, direction: Direction, day: u32) -> Trade {
        Trade::new(
            id,
            TradeDetails {
                isin: Isin::new(isin),
                name: "Test".to_string(),
                direction,
                quantity: dec!(10),
                price: dec!(1),
                currency: CurrencyCode::new("USD"),
                amount: dec!(10),
                date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            },
            "a@example.com",
            Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_partition_splits_by_isin_and_direction() {
        let trades = vec![
            trade(1, "US0378331005", Direction::Buy, 1),
            trade(2, "US5949181045", Direction::Sell, 2),
            trade(3, "US0378331005", Direction::Sell, 3),
        ];
        let books = partition(&trades);

        assert_eq!(books.len(), 2);
        let apple = &books[&Isin::new("US0378331005")];
        assert!(apple.is_two_sided());
        assert_eq!(apple.buys[0].trade.id, 1);
        assert_eq!(apple.sells[0].trade.id, 3);

        let msft = &books[&Isin::new("US5949181045")];
        assert!(!msft.is_two_sided());
    }

    #[test]
    fn test_queues_sorted_by_date_with_stable_ties() {
        let trades = vec![
            trade(1, "US0378331005", Direction::Buy, 20),
            trade(2, "US0378331005", Direction::Buy, 5),
            trade(3, "US0378331005", Direction::Buy, 5),
        ];
        let books = partition(&trades);
        let ids: Vec<i64> = books[&Isin::new("US0378331005")]
            .buys
            .iter()
            .map(|lot| lot.trade.id)
            .collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_lot_starts_with_full_quantity() {
        let t = trade(1, "US0378331005", Direction::Buy, 1);
        assert_eq!(Lot::new(&t).remaining, dec!(10));
    }
}
