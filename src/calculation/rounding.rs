//! Money rounding.
//!
//! Every monetary component is rounded once, at the step that produces it,
//! so sums and differences of components never drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for money amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to two decimal places, half away from zero, and fixes
/// the scale at two so `3000` is represented as `3000.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("136.3636").unwrap()).to_string(), "136.36");
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::new(3000, 0)).to_string(), "3000.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
