//! The strategy bundle a payroll run calculates with.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayCalculation};

use super::{
    AttendanceCredits, AttendanceSummary, ConfiguredEarnings, DeductionPolicy, DeductionRule,
    EarningsPolicy, HolidayCalendar, NegativeNetPayPolicy, NoHolidays, PayInputs, TaxPolicy,
    TaxRule, calculate_pay, working_days_with_calendar,
};

/// Every pluggable rule used to turn attendance into pay.
///
/// The default is the standard policy set: 10% flat tax, no
/// deductions, no additional earnings, half-day credit of 0.5, no holidays,
/// and negative net pay flagged for review.
#[derive(Clone)]
pub struct PayPolicies {
    tax: Arc<dyn TaxPolicy>,
    deductions: Arc<dyn DeductionPolicy>,
    earnings: Arc<dyn EarningsPolicy>,
    calendar: Arc<dyn HolidayCalendar>,
    credits: AttendanceCredits,
    negative_net_pay: NegativeNetPayPolicy,
}

impl Default for PayPolicies {
    fn default() -> Self {
        Self {
            tax: Arc::new(TaxRule::default()),
            deductions: Arc::new(DeductionRule::None),
            earnings: Arc::new(ConfiguredEarnings::default()),
            calendar: Arc::new(NoHolidays),
            credits: AttendanceCredits::default(),
            negative_net_pay: NegativeNetPayPolicy::default(),
        }
    }
}

impl fmt::Debug for PayPolicies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPolicies")
            .field("tax", &self.tax.policy_ref())
            .field("deductions", &self.deductions.policy_ref())
            .field("credits", &self.credits)
            .field("negative_net_pay", &self.negative_net_pay)
            .finish_non_exhaustive()
    }
}

impl PayPolicies {
    /// Replaces the tax policy.
    pub fn with_tax(mut self, tax: impl TaxPolicy + 'static) -> Self {
        self.tax = Arc::new(tax);
        self
    }

    /// Replaces the deduction policy.
    pub fn with_deductions(mut self, deductions: impl DeductionPolicy + 'static) -> Self {
        self.deductions = Arc::new(deductions);
        self
    }

    /// Replaces the earnings policy.
    pub fn with_earnings(mut self, earnings: impl EarningsPolicy + 'static) -> Self {
        self.earnings = Arc::new(earnings);
        self
    }

    /// Replaces the holiday calendar.
    pub fn with_calendar(mut self, calendar: impl HolidayCalendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Replaces the attendance credits.
    pub fn with_credits(mut self, credits: AttendanceCredits) -> Self {
        self.credits = credits;
        self
    }

    /// Replaces the negative net pay handling.
    pub fn with_negative_net_pay(mut self, policy: NegativeNetPayPolicy) -> Self {
        self.negative_net_pay = policy;
        self
    }

    /// The attendance credits in effect.
    pub fn credits(&self) -> &AttendanceCredits {
        &self.credits
    }

    /// The negative net pay handling in effect.
    pub fn negative_net_pay(&self) -> NegativeNetPayPolicy {
        self.negative_net_pay
    }

    /// Counts the working days of `[start, end]` against the configured calendar.
    pub fn working_days(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
        working_days_with_calendar(start, end, self.calendar.as_ref())
    }

    /// Calculates one employee's pay from their aggregated attendance.
    pub fn calculate(
        &self,
        employee: &Employee,
        working_days: u32,
        attendance: &AttendanceSummary,
    ) -> EngineResult<PayCalculation> {
        let overtime_amount = self
            .earnings
            .overtime_pay(employee, attendance, working_days, &self.credits)
            .ok_or_else(|| EngineError::InvalidInput {
                employee_id: employee.id.clone(),
                field: "overtime_amount".to_string(),
                message: "amount exceeds the representable range".to_string(),
            })?;
        let inputs = PayInputs {
            working_days,
            worked_days: attendance.worked_days,
            overtime_hours: attendance.overtime_hours,
            overtime_amount,
            bonus_amount: self.earnings.bonus(employee),
            allowance_amount: self.earnings.allowances(employee),
        };

        calculate_pay(
            employee,
            &inputs,
            self.tax.as_ref(),
            self.deductions.as_ref(),
            self.negative_net_pay,
        )
    }
}
