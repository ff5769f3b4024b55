//! Pay calculation and payroll entry models.
//!
//! [`PayCalculation`] is the pure output of the pay calculator for one
//! employee. [`Payroll`] is the persisted row that wraps it for one period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuditTrace;

/// One employee's computed pay, before persistence.
///
/// Invariants:
/// - `gross_pay == basic_pay + overtime_pay + bonus + allowances`
/// - `net_pay == gross_pay - tax_amount - deductions`, unless the net pay was
///   clamped, in which case `net_pay` is zero and the trace carries a
///   `NET_PAY_CLAMPED` warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// Monthly base salary used as input.
    pub base_salary: Decimal,
    /// Policy denominator of payable days in the period.
    pub working_days: u32,
    /// Days credited from attendance.
    pub worked_days: Decimal,
    /// Base salary divided by working days, rounded for display.
    pub daily_rate: Decimal,
    /// The pro-rated portion of the base salary.
    pub basic_pay: Decimal,
    /// Hours of overtime credited from attendance.
    pub overtime_hours: Decimal,
    /// Overtime earnings.
    pub overtime_pay: Decimal,
    /// Bonus earnings.
    pub bonus: Decimal,
    /// Allowance earnings.
    pub allowances: Decimal,
    /// Total earnings before tax and deductions.
    pub gross_pay: Decimal,
    /// Income tax withheld.
    pub tax_amount: Decimal,
    /// Other deductions.
    pub deductions: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// True when the result needs manual review (e.g., negative net pay).
    pub flagged: bool,
    /// Every decision made during the calculation.
    pub audit_trace: AuditTrace,
}

/// Status of a persisted payroll row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Computed and current.
    Calculated,
    /// Computed and current, but needs manual review.
    Flagged,
    /// Replaced by a later run; kept for the audit trail.
    Superseded,
}

/// One employee's persisted payroll result for one period.
///
/// There is at most one current (non-superseded) row per
/// `(employee_id, payroll_period_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier for the row.
    pub id: Uuid,
    /// The period the row belongs to.
    pub payroll_period_id: String,
    /// The employee the row belongs to.
    pub employee_id: String,
    /// The period run version that produced the row.
    pub version: u32,
    /// Row status.
    pub status: PayrollStatus,
    /// When the row was calculated.
    pub calculated_at: DateTime<Utc>,
    /// Monthly base salary used as input.
    pub base_salary: Decimal,
    /// Pro-rated portion of the base salary.
    pub basic_pay: Decimal,
    /// Hours of overtime credited.
    pub overtime_hours: Decimal,
    /// Overtime earnings.
    pub overtime_pay: Decimal,
    /// Bonus earnings.
    pub bonus: Decimal,
    /// Allowance earnings.
    pub allowances: Decimal,
    /// Total earnings.
    pub gross_pay: Decimal,
    /// Income tax withheld.
    pub tax_amount: Decimal,
    /// Other deductions.
    pub deductions: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// Payable days in the period.
    pub working_days: u32,
    /// Days credited from attendance.
    pub worked_days: Decimal,
    /// Calculation audit trail.
    pub audit_trace: AuditTrace,
}

impl Payroll {
    /// Wraps a calculation into a new row for a period run.
    pub fn from_calculation(payroll_period_id: &str, version: u32, calc: PayCalculation) -> Self {
        let status = if calc.flagged {
            PayrollStatus::Flagged
        } else {
            PayrollStatus::Calculated
        };
        Self {
            id: Uuid::new_v4(),
            payroll_period_id: payroll_period_id.to_string(),
            employee_id: calc.employee_id,
            version,
            status,
            calculated_at: Utc::now(),
            base_salary: calc.base_salary,
            basic_pay: calc.basic_pay,
            overtime_hours: calc.overtime_hours,
            overtime_pay: calc.overtime_pay,
            bonus: calc.bonus,
            allowances: calc.allowances,
            gross_pay: calc.gross_pay,
            tax_amount: calc.tax_amount,
            deductions: calc.deductions,
            net_pay: calc.net_pay,
            working_days: calc.working_days,
            worked_days: calc.worked_days,
            audit_trace: calc.audit_trace,
        }
    }

    /// Returns true unless the row was superseded by a later run.
    pub fn is_current(&self) -> bool {
        self.status != PayrollStatus::Superseded
    }
}
