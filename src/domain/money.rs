use std::str::FromStr;

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MoneyError{
    #[error("{0} is not a representable currency amount")]
    Unrepresentable(f64),
    #[error("currency total overflowed")]
    Overflow
}

// Midpoint away from zero on the shortest decimal form of the input
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

pub fn round_currency(value: f64) -> f64 {
    match to_decimal(value) {
        Some(d) => round_decimal(d),
        None => (value * 100.0).round() / 100.0
    }
}

pub fn round_decimal(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// Sums in decimal so 0.1 + 0.2 lands on the cent
pub fn sum_currency<I>(values: I) -> Result<f64, MoneyError>
where
    I: IntoIterator<Item = f64>
{
    let total = values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| {
            let value = to_decimal(value).ok_or(MoneyError::Unrepresentable(value))?;
            acc.checked_add(value).ok_or(MoneyError::Overflow)
        })?;

    Ok(round_decimal(total))
}
