use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three letter currency code the trade price is stated in
///
/// Carried through for display only; lot matching assumes every trade of one
/// instrument shares a comparable currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Currency must be a three letter code, got '{0}'")]
pub struct CurrencyError(pub String);

impl CurrencyCode {
    /// Wrap a code without validation
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parse a three letter code, normalising it to upper case
    pub fn parse(code: &str) -> Result<Self, CurrencyError> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency() {
        assert_eq!(CurrencyCode::parse("usd").unwrap().as_str(), "USD");
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("US1").is_err());
        assert!(CurrencyCode::parse("EURO").is_err());
    }
}
