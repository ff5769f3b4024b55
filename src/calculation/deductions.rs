//! Non-tax deduction strategies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Computes an employee's non-tax deductions for one period.
pub trait DeductionPolicy: Send + Sync {
    /// Returns the deductions for `employee`, or `None` if they cannot be
    /// represented. Callers round the result.
    fn compute_deductions(&self, employee: &Employee) -> Option<Decimal>;

    /// A short reference recorded in the audit trace.
    fn policy_ref(&self) -> String {
        "deductions:custom".to_string()
    }
}

impl<F> DeductionPolicy for F
where
    F: Fn(&Employee) -> Decimal + Send + Sync,
{
    fn compute_deductions(&self, employee: &Employee) -> Option<Decimal> {
        Some(self(employee))
    }
}

/// Configurable deduction rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeductionRule {
    /// No deductions.
    #[default]
    None,
    /// The same amount for every employee.
    Fixed {
        /// The amount deducted.
        amount: Decimal,
    },
    /// A share of the employee's base salary.
    PercentOfBase {
        /// The share (0.05 = 5%).
        rate: Decimal,
    },
}

impl DeductionPolicy for DeductionRule {
    fn compute_deductions(&self, employee: &Employee) -> Option<Decimal> {
        match self {
            DeductionRule::None => Some(Decimal::ZERO),
            DeductionRule::Fixed { amount } => Some(*amount),
            DeductionRule::PercentOfBase { rate } => employee.base_salary.checked_mul(*rate),
        }
    }

    fn policy_ref(&self) -> String {
        match self {
            DeductionRule::None => "deductions:none".to_string(),
            DeductionRule::Fixed { amount } => format!("deductions:fixed:{}", amount.normalize()),
            DeductionRule::PercentOfBase { rate } => {
                format!("deductions:percent_of_base:{}", rate.normalize())
            }
        }
    }
}
