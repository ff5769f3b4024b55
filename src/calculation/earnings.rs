//! Earnings beyond basic pay: overtime, allowances and bonus.
//!
//! All three default to zero. They are modelled as
//! an [`EarningsPolicy`] so real business rules can be plugged in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Employee;

use super::{AttendanceCredits, AttendanceSummary};

/// Computes an employee's additional earnings for one period.
pub trait EarningsPolicy: Send + Sync {
    /// Overtime pay from the aggregated attendance, or `None` if the amount
    /// cannot be represented.
    ///
    /// `credits` are the same credits the attendance was aggregated with, so
    /// the hourly rate and the overtime hours share one standard day.
    fn overtime_pay(
        &self,
        employee: &Employee,
        attendance: &AttendanceSummary,
        working_days: u32,
        credits: &AttendanceCredits,
    ) -> Option<Decimal>;

    /// Allowances owed to the employee.
    fn allowances(&self, employee: &Employee) -> Decimal;

    /// Bonus owed to the employee.
    fn bonus(&self, employee: &Employee) -> Decimal;
}

/// How overtime hours are paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OvertimeRule {
    /// Overtime is not paid.
    #[default]
    None,
    /// Overtime hours paid at a multiple of the hourly equivalent of salary.
    ///
    /// `hourly = base_salary / working_days / standard_daily_hours`, where the
    /// standard day comes from [`AttendanceCredits`].
    HourlyMultiple {
        /// The multiple (1.5 = time and a half).
        multiplier: Decimal,
    },
}

/// A simple earnings component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EarningsRule {
    /// Nothing is paid.
    #[default]
    None,
    /// The same amount for every employee.
    Fixed {
        /// The amount paid.
        amount: Decimal,
    },
}

impl EarningsRule {
    fn amount(&self) -> Decimal {
        match self {
            EarningsRule::None => Decimal::ZERO,
            EarningsRule::Fixed { amount } => *amount,
        }
    }
}

/// An [`EarningsPolicy`] assembled from configured rules.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{ConfiguredEarnings, EarningsPolicy, EarningsRule};
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let earnings = ConfiguredEarnings {
///     allowances: EarningsRule::Fixed { amount: Decimal::new(150, 0) },
///     ..ConfiguredEarnings::default()
/// };
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     company_id: "acme".to_string(),
///     base_salary: Decimal::new(3000, 0),
///     hire_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     termination_date: None,
///     is_active: true,
/// };
/// assert_eq!(earnings.allowances(&employee), Decimal::new(150, 0));
/// assert_eq!(earnings.bonus(&employee), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredEarnings {
    /// Overtime rule.
    #[serde(default)]
    pub overtime: OvertimeRule,
    /// Allowance rule.
    #[serde(default)]
    pub allowances: EarningsRule,
    /// Bonus rule.
    #[serde(default)]
    pub bonus: EarningsRule,
}

impl EarningsPolicy for ConfiguredEarnings {
    fn overtime_pay(
        &self,
        employee: &Employee,
        attendance: &AttendanceSummary,
        working_days: u32,
        credits: &AttendanceCredits,
    ) -> Option<Decimal> {
        match &self.overtime {
            OvertimeRule::None => Some(Decimal::ZERO),
            OvertimeRule::HourlyMultiple { multiplier } => {
                let hours_in_period =
                    Decimal::from(working_days).checked_mul(credits.standard_daily_hours)?;
                // zero working days is rejected by the pay calculator
                if hours_in_period.is_zero() {
                    return Some(Decimal::ZERO);
                }
                let hourly = employee.base_salary.checked_div(hours_in_period)?;
                attendance
                    .overtime_hours
                    .checked_mul(hourly)?
                    .checked_mul(*multiplier)
            }
        }
    }

    fn allowances(&self, _employee: &Employee) -> Decimal {
        self.allowances.amount()
    }

    fn bonus(&self, _employee: &Employee) -> Decimal {
        self.bonus.amount()
    }
}
