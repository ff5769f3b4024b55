//! Income tax strategies.
//!
//! Tax law varies by jurisdiction, so the calculator never hardcodes a rate.
//! It takes any [`TaxPolicy`]: a configured [`TaxRule`] or a plain closure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computes the tax owed on a gross pay amount.
pub trait TaxPolicy: Send + Sync {
    /// Returns the tax for `gross_pay`, or `None` if it cannot be represented.
    /// Callers round the result.
    fn compute_tax(&self, gross_pay: Decimal) -> Option<Decimal>;

    /// A short reference recorded in the audit trace.
    fn policy_ref(&self) -> String {
        "tax:custom".to_string()
    }
}

impl<F> TaxPolicy for F
where
    F: Fn(Decimal) -> Decimal + Send + Sync,
{
    fn compute_tax(&self, gross_pay: Decimal) -> Option<Decimal> {
        Some(self(gross_pay))
    }
}

/// One marginal band of a progressive scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the band; `None` for the top band.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Rate applied to the part of gross pay inside the band (0.10 = 10%).
    pub rate: Decimal,
}

/// Configurable tax rules.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{TaxPolicy, TaxRule};
/// use rust_decimal::Decimal;
///
/// let flat = TaxRule::Flat { rate: Decimal::new(10, 2) };
/// assert_eq!(flat.compute_tax(Decimal::new(3000, 0)), Some(Decimal::new(300, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxRule {
    /// A single rate on all gross pay.
    Flat {
        /// The rate (0.10 = 10%).
        rate: Decimal,
    },
    /// Marginal bands, ordered by ascending `up_to`.
    Progressive {
        /// The bands of the scale.
        brackets: Vec<TaxBracket>,
    },
    /// No tax withheld.
    Exempt,
}

/// The default flat rate of 10%.
pub const DEFAULT_FLAT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

impl Default for TaxRule {
    fn default() -> Self {
        TaxRule::Flat {
            rate: DEFAULT_FLAT_TAX_RATE,
        }
    }
}

impl TaxPolicy for TaxRule {
    fn compute_tax(&self, gross_pay: Decimal) -> Option<Decimal> {
        if gross_pay <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        match self {
            TaxRule::Flat { rate } => gross_pay.checked_mul(*rate),
            TaxRule::Progressive { brackets } => progressive_tax(gross_pay, brackets),
            TaxRule::Exempt => Some(Decimal::ZERO),
        }
    }

    fn policy_ref(&self) -> String {
        match self {
            TaxRule::Flat { rate } => format!("tax:flat:{}", rate.normalize()),
            TaxRule::Progressive { brackets } => format!("tax:progressive:{}", brackets.len()),
            TaxRule::Exempt => "tax:exempt".to_string(),
        }
    }
}

fn progressive_tax(gross_pay: Decimal, brackets: &[TaxBracket]) -> Option<Decimal> {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        let upper = match bracket.up_to {
            Some(limit) => limit.min(gross_pay),
            None => gross_pay,
        };
        if upper > lower {
            tax = tax.checked_add((upper - lower).checked_mul(bracket.rate)?)?;
        }
        match bracket.up_to {
            Some(limit) if limit < gross_pay => lower = lower.max(limit),
            _ => break,
        }
    }

    Some(tax)
}
