//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency every marketplace price is quoted in.
pub const CURRENCY: &Currency = iso::BRL;

/// Symbol printed in front of formatted amounts.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// An amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `price` each.
pub fn line_subtotal(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Convert a decimal amount into money, rounding to whole cents.
///
/// # Errors
///
/// Returns [`TotalPriceError::OutOfRange`] if the amount does not fit in minor units.
pub fn to_money(amount: Decimal) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or(TotalPriceError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, CURRENCY))
}

/// Sum `price * quantity` over a set of lines.
///
/// An empty set totals to zero.
///
/// # Errors
///
/// - [`TotalPriceError::OutOfRange`]: a line subtotal does not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic error.
pub fn total_price<I>(lines: I) -> Result<Money<'static, Currency>, TotalPriceError>
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .try_fold(Money::from_minor(0, CURRENCY), |acc, (price, quantity)| {
            let subtotal = to_money(line_subtotal(price, quantity))?;

            Ok(acc.add(subtotal)?)
        })
}

/// Format an amount as `R$ 0.00`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{CURRENCY_SYMBOL} {rounded:.2}")
}

/// Format money as `R$ 0.00`.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format_price(Decimal::new(money.to_minor_units(), 2))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn total_price_sums_price_times_quantity() -> TestResult {
        let lines = [(Decimal::new(10_00, 2), 2), (Decimal::new(5_00, 2), 1)];

        assert_eq!(total_price(lines)?, Money::from_minor(25_00, CURRENCY));

        Ok(())
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_price([])?, Money::from_minor(0, CURRENCY));

        Ok(())
    }

    #[test]
    fn format_price_pads_to_two_places() {
        assert_eq!(format_price(Decimal::new(399, 1)), "R$ 39.90");
        assert_eq!(format_price(Decimal::from(150)), "R$ 150.00");
    }

    #[test]
    fn format_price_rounds_half_away_from_zero() {
        assert_eq!(format_price(Decimal::new(10_005, 3)), "R$ 10.01");
    }

    #[test]
    fn format_money_uses_minor_units() {
        let money = Money::from_minor(25_00, CURRENCY);

        assert_eq!(format_money(&money), "R$ 25.00");
    }
}
