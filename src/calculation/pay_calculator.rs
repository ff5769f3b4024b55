//! Pay calculation for a single employee.
//!
//! This is the arithmetic core of a payroll run:
//!
//! 1. `daily_rate = base_salary / working_days`
//! 2. `basic_pay = base_salary * worked_days / working_days`
//! 3. `gross_pay = basic_pay + overtime + bonus + allowances`
//! 4. `tax_amount = tax_policy(gross_pay)`
//! 5. `deductions = deduction_policy(employee)`
//! 6. `net_pay = gross_pay - tax_amount - deductions`
//!
//! Each component is rounded to two places as it is produced; gross and net
//! are exact sums of the rounded components.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, Employee, PayCalculation};

use super::{DeductionPolicy, TaxPolicy, round_money};

/// Warning code raised when attendance credits more days than the period has.
pub const WORKED_DAYS_EXCEED_WORKING_DAYS: &str = "WORKED_DAYS_EXCEED_WORKING_DAYS";

/// Warning code raised when tax and deductions exceed gross pay.
pub const NEGATIVE_NET_PAY: &str = "NEGATIVE_NET_PAY";

/// Warning code raised when a negative net pay was clamped to zero.
pub const NET_PAY_CLAMPED: &str = "NET_PAY_CLAMPED";

/// What to do when tax and deductions exceed gross pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeNetPayPolicy {
    /// Keep the negative amount and flag the result for manual review.
    #[default]
    Flag,
    /// Pay zero and record the clamped amount as a warning.
    Clamp,
}

/// The per-employee inputs of a pay calculation, besides the employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInputs {
    /// Payable days in the period; must be positive.
    pub working_days: u32,
    /// Days credited from attendance.
    pub worked_days: Decimal,
    /// Overtime hours credited from attendance (informational).
    pub overtime_hours: Decimal,
    /// Overtime earnings.
    pub overtime_amount: Decimal,
    /// Bonus earnings.
    pub bonus_amount: Decimal,
    /// Allowance earnings.
    pub allowance_amount: Decimal,
}

impl PayInputs {
    /// Inputs with no overtime, bonus or allowances.
    pub fn new(working_days: u32, worked_days: Decimal) -> Self {
        Self {
            working_days,
            worked_days,
            overtime_hours: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            bonus_amount: Decimal::ZERO,
            allowance_amount: Decimal::ZERO,
        }
    }
}

/// Calculates one employee's pay.
///
/// The function is pure: identical inputs always give identical output.
///
/// # Errors
///
/// - [`EngineError::DivisionByZero`] if `working_days` is zero.
/// - [`EngineError::InvalidInput`] if the base salary, worked days, any
///   earnings component, or a policy-computed tax or deduction is negative,
///   or if any step overflows the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_pay, DeductionRule, NegativeNetPayPolicy, PayInputs, TaxRule};
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     company_id: "acme".to_string(),
///     base_salary: Decimal::from_str("3000").unwrap(),
///     hire_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     termination_date: None,
///     is_active: true,
/// };
///
/// let result = calculate_pay(
///     &employee,
///     &PayInputs::new(22, Decimal::from(11)),
///     &TaxRule::default(),
///     &DeductionRule::None,
///     NegativeNetPayPolicy::Flag,
/// )
/// .unwrap();
///
/// assert_eq!(result.basic_pay.to_string(), "1500.00");
/// assert_eq!(result.tax_amount.to_string(), "150.00");
/// assert_eq!(result.net_pay.to_string(), "1350.00");
/// ```
pub fn calculate_pay(
    employee: &Employee,
    inputs: &PayInputs,
    tax_policy: &dyn TaxPolicy,
    deduction_policy: &dyn DeductionPolicy,
    negative_net_pay: NegativeNetPayPolicy,
) -> EngineResult<PayCalculation> {
    if inputs.working_days == 0 {
        return Err(EngineError::DivisionByZero {
            context: format!("daily rate for employee '{}' with zero working days", employee.id),
        });
    }
    ensure_non_negative(employee, "base_salary", employee.base_salary)?;
    ensure_non_negative(employee, "worked_days", inputs.worked_days)?;
    ensure_non_negative(employee, "overtime_amount", inputs.overtime_amount)?;
    ensure_non_negative(employee, "bonus_amount", inputs.bonus_amount)?;
    ensure_non_negative(employee, "allowance_amount", inputs.allowance_amount)?;

    let mut trace = AuditTrace::default();
    let working_days = Decimal::from(inputs.working_days);

    // Step 1: daily rate
    let daily_rate = round_money(employee.base_salary / working_days);
    trace.record(
        "daily_rate",
        "Daily Rate",
        "proration:working_days",
        serde_json::json!({
            "base_salary": employee.base_salary.to_string(),
            "working_days": inputs.working_days
        }),
        serde_json::json!({ "daily_rate": daily_rate.to_string() }),
        format!(
            "${} / {} working days = ${}",
            employee.base_salary.normalize(),
            inputs.working_days,
            daily_rate
        ),
    );

    // Step 2: basic pay, multiplied before dividing so full attendance is exact
    let basic_pay = employee
        .base_salary
        .checked_mul(inputs.worked_days)
        .and_then(|v| v.checked_div(working_days))
        .map(round_money)
        .ok_or_else(|| overflowed(employee, "base_salary"))?;
    trace.record(
        "basic_pay",
        "Basic Pay",
        "proration:worked_days",
        serde_json::json!({
            "base_salary": employee.base_salary.to_string(),
            "worked_days": inputs.worked_days.normalize().to_string(),
            "working_days": inputs.working_days
        }),
        serde_json::json!({ "basic_pay": basic_pay.to_string() }),
        format!(
            "${} x {} / {} days = ${}",
            employee.base_salary.normalize(),
            inputs.worked_days.normalize(),
            inputs.working_days,
            basic_pay
        ),
    );
    if inputs.worked_days > working_days {
        trace.warn(
            WORKED_DAYS_EXCEED_WORKING_DAYS,
            format!(
                "{} worked days credited against {} working days",
                inputs.worked_days.normalize(),
                inputs.working_days
            ),
            "medium",
        );
    }

    // Steps 3-5: additional earnings
    let overtime_pay = round_money(inputs.overtime_amount);
    trace.record(
        "overtime_pay",
        "Overtime Pay",
        "earnings:overtime",
        serde_json::json!({
            "overtime_hours": inputs.overtime_hours.normalize().to_string(),
            "overtime_amount": inputs.overtime_amount.to_string()
        }),
        serde_json::json!({ "overtime_pay": overtime_pay.to_string() }),
        format!(
            "{} overtime hours paid ${}",
            inputs.overtime_hours.normalize(),
            overtime_pay
        ),
    );

    let allowances = round_money(inputs.allowance_amount);
    trace.record(
        "allowances",
        "Allowances",
        "earnings:allowances",
        serde_json::json!({ "allowance_amount": inputs.allowance_amount.to_string() }),
        serde_json::json!({ "allowances": allowances.to_string() }),
        format!("Allowances ${}", allowances),
    );

    let bonus = round_money(inputs.bonus_amount);
    trace.record(
        "bonus",
        "Bonus",
        "earnings:bonus",
        serde_json::json!({ "bonus_amount": inputs.bonus_amount.to_string() }),
        serde_json::json!({ "bonus": bonus.to_string() }),
        format!("Bonus ${}", bonus),
    );

    // Step 6: gross
    let gross_pay = basic_pay
        .checked_add(overtime_pay)
        .and_then(|v| v.checked_add(bonus))
        .and_then(|v| v.checked_add(allowances))
        .ok_or_else(|| overflowed(employee, "gross_pay"))?;
    trace.record(
        "gross_pay",
        "Gross Pay",
        "gross:sum",
        serde_json::json!({
            "basic_pay": basic_pay.to_string(),
            "overtime_pay": overtime_pay.to_string(),
            "bonus": bonus.to_string(),
            "allowances": allowances.to_string()
        }),
        serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        format!(
            "${} + ${} + ${} + ${} = ${}",
            basic_pay, overtime_pay, bonus, allowances, gross_pay
        ),
    );

    // Step 7: tax
    let tax_amount = tax_policy
        .compute_tax(gross_pay)
        .map(round_money)
        .ok_or_else(|| overflowed(employee, "tax_amount"))?;
    ensure_non_negative(employee, "tax_amount", tax_amount)?;
    let tax_ref = tax_policy.policy_ref();
    trace.record(
        "tax",
        "Income Tax",
        &tax_ref,
        serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        serde_json::json!({ "tax_amount": tax_amount.to_string() }),
        format!("{} on ${} = ${}", tax_ref, gross_pay, tax_amount),
    );

    // Step 8: deductions
    let deductions = deduction_policy
        .compute_deductions(employee)
        .map(round_money)
        .ok_or_else(|| overflowed(employee, "deductions"))?;
    ensure_non_negative(employee, "deductions", deductions)?;
    let deduction_ref = deduction_policy.policy_ref();
    trace.record(
        "deductions",
        "Deductions",
        &deduction_ref,
        serde_json::json!({ "employee_id": employee.id }),
        serde_json::json!({ "deductions": deductions.to_string() }),
        format!("{} = ${}", deduction_ref, deductions),
    );

    // Step 9: net
    let mut net_pay = gross_pay
        .checked_sub(tax_amount)
        .and_then(|v| v.checked_sub(deductions))
        .ok_or_else(|| overflowed(employee, "net_pay"))?;
    let mut flagged = false;
    if net_pay < Decimal::ZERO {
        match negative_net_pay {
            NegativeNetPayPolicy::Flag => {
                flagged = true;
                trace.warn(
                    NEGATIVE_NET_PAY,
                    format!("tax and deductions exceed gross pay, net pay is ${}", net_pay),
                    "high",
                );
            }
            NegativeNetPayPolicy::Clamp => {
                trace.warn(
                    NET_PAY_CLAMPED,
                    format!("net pay of ${} clamped to $0.00", net_pay),
                    "medium",
                );
                net_pay = round_money(Decimal::ZERO);
            }
        }
    }
    trace.record(
        "net_pay",
        "Net Pay",
        "net:gross_less_withholdings",
        serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "tax_amount": tax_amount.to_string(),
            "deductions": deductions.to_string()
        }),
        serde_json::json!({ "net_pay": net_pay.to_string(), "flagged": flagged }),
        format!(
            "${} - ${} - ${} = ${}",
            gross_pay, tax_amount, deductions, net_pay
        ),
    );

    Ok(PayCalculation {
        employee_id: employee.id.clone(),
        base_salary: employee.base_salary,
        working_days: inputs.working_days,
        worked_days: inputs.worked_days,
        daily_rate,
        basic_pay,
        overtime_hours: inputs.overtime_hours,
        overtime_pay,
        bonus,
        allowances,
        gross_pay,
        tax_amount,
        deductions,
        net_pay,
        flagged,
        audit_trace: trace,
    })
}

fn ensure_non_negative(employee: &Employee, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            employee_id: employee.id.clone(),
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

fn overflowed(employee: &Employee, field: &str) -> EngineError {
    EngineError::InvalidInput {
        employee_id: employee.id.clone(),
        field: field.to_string(),
        message: "amount exceeds the representable range".to_string(),
    }
}
