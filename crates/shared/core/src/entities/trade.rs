use serde::{Deserialize, Serialize};

use super::Direction;
use crate::instruments::{CurrencyCode, Isin};
use crate::values::{Amount, Price, Quantity, Reporter, Timestamp, TradeDate, TradeId};

/// The reporter-supplied part of a trade
///
/// Everything a reporter states about a trade; storage assigns the id and the
/// service stamps the reporter and reporting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDetails {
    pub isin: Isin,
    /// Display name of the security
    pub name: String,
    pub direction: Direction,
    pub quantity: Quantity,
    pub price: Price,
    pub currency: CurrencyCode,
    pub amount: Amount,
    pub date: TradeDate,
}

/// A reported securities trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub isin: Isin,
    pub name: String,
    pub direction: Direction,
    pub quantity: Quantity,
    pub price: Price,
    pub currency: CurrencyCode,
    pub amount: Amount,
    pub date: TradeDate,
    pub reporter: Reporter,
    /// When the trade was last reported or amended (UTC)
    pub reported_at: Timestamp,
}

impl Trade {
    pub fn new(
        id: TradeId,
        details: TradeDetails,
        reporter: impl Into<Reporter>,
        reported_at: Timestamp,
    ) -> Self {
        Self {
            id,
            isin: details.isin,
            name: details.name,
            direction: details.direction,
            quantity: details.quantity,
            price: details.price,
            currency: details.currency,
            amount: details.amount,
            date: details.date,
            reporter: reporter.into(),
            reported_at,
        }
    }

    /// Snapshot of the reporter-supplied fields
    pub fn details(&self) -> TradeDetails {
        TradeDetails {
            isin: self.isin.clone(),
            name: self.name.clone(),
            direction: self.direction,
            quantity: self.quantity,
            price: self.price,
            currency: self.currency.clone(),
            amount: self.amount,
            date: self.date,
        }
    }

    /// Overwrite the reporter-supplied fields, returning whether anything changed
    pub fn apply(&mut self, details: TradeDetails) -> bool {
        if self.details() == details {
            return false;
        }
        self.isin = details.isin;
        self.name = details.name;
        self.direction = details.direction;
        self.quantity = details.quantity;
        self.price = details.price;
        self.currency = details.currency;
        self.amount = details.amount;
        self.date = details.date;
        true
    }
}
