use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ron,
    Eur,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Ron => f.write_str("RON"),
            Currency::Eur => f.write_str("EUR"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Conversion from {from} to {to} is not supported")]
    UnsupportedCurrencyPair { from: Currency, to: Currency },
    #[error("{amount} {from} cannot be represented in {to}")]
    AmountOutOfRange {
        amount: Decimal,
        from: Currency,
        to: Currency,
    },
}

/// Looks up the static exchange rate used to convert `from` into `to`.
pub fn exchange_rate(from: Currency, to: Currency) -> Result<Decimal, ConversionError> {
    match (from, to) {
        (Currency::Eur, Currency::Ron) => Ok(Decimal::new(498, 2)),
        (Currency::Ron, Currency::Eur) => Ok(Decimal::new(20, 2)),
        _ => Err(ConversionError::UnsupportedCurrencyPair { from, to }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Converts into `target`, returning an unchanged copy when the currency already matches.
    pub fn convert_to(&self, target: Currency) -> Result<Money, ConversionError> {
        if self.currency == target {
            return Ok(self.clone());
        }
        let rate = exchange_rate(self.currency, target)?;
        let converted = self
            .amount
            .checked_mul(rate)
            .ok_or(ConversionError::AmountOutOfRange {
                amount: self.amount,
                from: self.currency,
                to: target,
            })?;
        Ok(Money::new(converted, target))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}
