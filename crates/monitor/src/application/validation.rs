//! Input validation for reported trades
//!
//! Every field is checked and all problems are reported at once, keyed by
//! field name, so a reporter can fix a submission in one round trip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tcm_core::{CurrencyCode, Direction, Isin, TradeDetails};

const MISSING: &str = "Missing data for required field.";

/// A trade as submitted by a reporter, before validation
///
/// `id`, `reporter` and `reported_at` are assigned by the service and are
/// rejected as unknown fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeDraft {
    pub isin: Option<String>,
    pub name: Option<String>,
    pub direction: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    /// Defaults to `quantity * price`
    pub amount: Option<Decimal>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Field name -> messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates submitted trades against reporting rules
pub struct TradeValidator;

impl TradeValidator {
    /// Validate a draft, with `today` as the latest acceptable trade date
    pub fn validate(
        draft: &TradeDraft,
        today: NaiveDate,
    ) -> Result<TradeDetails, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let isin = match draft.isin.as_deref() {
            Some(code) => Isin::parse(code)
                .map_err(|e| errors.add("isin", e.to_string()))
                .ok(),
            None => missing(&mut errors, "isin"),
        };

        let name = match draft.name.as_deref().map(str::trim) {
            Some("") => {
                errors.add("name", "Must not be empty.");
                None
            }
            Some(name) => Some(name.to_string()),
            None => missing(&mut errors, "name"),
        };

        let direction = match draft.direction.as_deref() {
            Some(d) => Direction::try_from(d)
                .map_err(|e| errors.add("direction", e))
                .ok(),
            None => missing(&mut errors, "direction"),
        };

        let quantity = positive(&mut errors, "quantity", draft.quantity);
        let price = positive(&mut errors, "price", draft.price);

        let currency = match draft.currency.as_deref() {
            Some(code) => CurrencyCode::parse(code)
                .map_err(|_| errors.add("currency", "Must be a three letter code."))
                .ok(),
            None => missing(&mut errors, "currency"),
        };

        let amount = match (draft.amount, quantity, price) {
            (Some(amount), _, _) if amount < Decimal::ZERO => {
                errors.add("amount", "Must not be negative.");
                None
            }
            (Some(amount), _, _) => Some(amount),
            (None, Some(quantity), Some(price)) => quantity.checked_mul(price).or_else(|| {
                errors.add("amount", "Number too large.");
                None
            }),
            (None, _, _) => None,
        };

        let date = match draft.date.as_deref() {
            Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(date) if date > today => {
                    errors.add("date", "Future dates not allowed!");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("date", "Not a valid date.");
                    None
                }
            },
            None => missing(&mut errors, "date"),
        };

        match (isin, name, direction, quantity, price, currency, amount, date) {
            (
                Some(isin),
                Some(name),
                Some(direction),
                Some(quantity),
                Some(price),
                Some(currency),
                Some(amount),
                Some(date),
            ) if errors.is_empty() => Ok(TradeDetails {
                isin,
                name,
                direction,
                quantity,
                price,
                currency,
                amount,
                date,
            }),
            _ => Err(errors),
        }
    }
}

fn missing<T>(errors: &mut ValidationErrors, field: &str) -> Option<T> {
    errors.add(field, MISSING);
    None
}

fn positive(errors: &mut ValidationErrors, field: &str, value: Option<Decimal>) -> Option<Decimal> {
    match value {
        Some(v) if v > Decimal::ZERO => Some(v),
        Some(_) => {
            errors.add(field, "Must be greater than 0.");
            None
        }
        None => missing(errors, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 7, 15).unwrap()
    }

    fn draft() -> TradeDraft {
        TradeDraft {
            isin: Some("US0378331005".to_string()),
            name: Some("Apple Inc".to_string()),
            direction: Some("Buy".to_string()),
            quantity: Some(dec!(100)),
            price: Some(dec!(365.00)),
            currency: Some("USD".to_string()),
            amount: Some(dec!(36500)),
            date: Some("2020-01-01".to_string()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let details = TradeValidator::validate(&draft(), today()).unwrap();
        assert_eq!(details.isin.as_str(), "US0378331005");
        assert_eq!(details.direction, Direction::Buy);
        assert_eq!(details.amount, dec!(36500));
        assert_eq!(details.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_amount_defaults_to_notional() {
        let mut d = draft();
        d.amount = None;
        let details = TradeValidator::validate(&d, today()).unwrap();
        assert_eq!(details.amount, dec!(36500));
    }

    #[test]
    fn test_overflowing_notional_rejected() {
        let mut d = draft();
        d.amount = None;
        d.quantity = Some(Decimal::from_str_exact("70000000000000000000000000000").unwrap());
        d.price = Some(dec!(2));

        let errors = TradeValidator::validate(&d, today()).unwrap_err();
        assert_eq!(errors.get("amount"), Some(&["Number too large.".to_string()][..]));
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_explicit_amount_skips_notional() {
        let mut d = draft();
        d.amount = Some(dec!(1));
        d.quantity = Some(Decimal::MAX);
        d.price = Some(dec!(2));

        let details = TradeValidator::validate(&d, today()).unwrap();
        assert_eq!(details.amount, dec!(1));
    }

    #[test]
    fn test_collects_every_field_error() {
        let d = TradeDraft {
            isin: Some("US0378331004".to_string()),
            name: Some(" ".to_string()),
            direction: Some("X".to_string()),
            quantity: Some(dec!(0)),
            price: Some(dec!(-1)),
            currency: Some("US".to_string()),
            amount: Some(dec!(-5)),
            date: Some("20200715".to_string()),
        };
        let errors = TradeValidator::validate(&d, today()).unwrap_err();

        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                "amount",
                "currency",
                "date",
                "direction",
                "isin",
                "name",
                "price",
                "quantity"
            ]
        );
        assert_eq!(errors.get("isin").unwrap(), ["Invalid ISIN."]);
        assert_eq!(errors.get("date").unwrap(), ["Not a valid date."]);
    }

    #[test]
    fn test_missing_fields() {
        let errors = TradeValidator::validate(&TradeDraft::default(), today()).unwrap_err();
        for field in ["isin", "name", "direction", "quantity", "price", "currency", "date"] {
            assert_eq!(errors.get(field).unwrap(), [MISSING], "{}", field);
        }
        assert!(errors.get("amount").is_none());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut d = draft();
        d.date = Some("2020-07-16".to_string());
        let errors = TradeValidator::validate(&d, today()).unwrap_err();
        assert_eq!(errors.get("date").unwrap(), ["Future dates not allowed!"]);

        d.date = Some("2020-07-15".to_string());
        assert!(TradeValidator::validate(&d, today()).is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{"isin": "US0378331005", "reporter": "someone@example.com"}"#;
        assert!(serde_json::from_str::<TradeDraft>(json).is_err());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.add("isin", "Invalid ISIN.");
        errors.add("date", "Not a valid date.");
        assert_eq!(
            errors.to_string(),
            "date: Not a valid date.; isin: Invalid ISIN."
        );
    }
}
