use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of every ISIN
pub const ISIN_LEN: usize = 12;

/// International Securities Identification Number
///
/// Groups trades into instruments for lot matching. `Isin::new` wraps a code
/// without checking it (records read back from storage were validated when
/// they were reported); `Isin::parse` enforces the format and check digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isin(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsinError {
    #[error("Not a valid ISIN.")]
    Malformed,

    #[error("Invalid ISIN.")]
    BadCheckDigit,
}

impl Isin {
    /// Wrap an identifier without validation
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parse and validate an ISIN, normalising it to upper case
    pub fn parse(code: &str) -> Result<Self, IsinError> {
        let code = code.trim();
        if !code.is_ascii()
            || code.len() != ISIN_LEN
            || !code[..2].chars().all(|c| c.is_ascii_alphabetic())
            || !code[2..].chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(IsinError::Malformed);
        }

        let code = code.to_ascii_uppercase();
        if !luhn_base36(&code) {
            return Err(IsinError::BadCheckDigit);
        }
        Ok(Self(code))
    }

    /// Get the ISIN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Luhn check over the decimal expansion of the base-36 characters.
///
/// Letters expand to two digits (A=10 .. Z=35). Starting from the rightmost
/// digit, every second digit is doubled and the digits of the products summed.
fn luhn_base36(code: &str) -> bool {
    let digits: Vec<u32> = code
        .chars()
        .filter_map(|c| c.to_digit(36))
        .flat_map(|v| {
            if v >= 10 {
                vec![v / 10, v % 10]
            } else {
                vec![v]
            }
        })
        .collect();

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                doubled / 10 + doubled % 10
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

impl std::fmt::Display for Isin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
