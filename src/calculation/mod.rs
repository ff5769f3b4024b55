//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure functions of a payroll run: counting a
//! period's working days, aggregating attendance into worked days, and
//! turning both into an employee's basic, gross and net pay. Tax,
//! deductions and additional earnings are strategies injected through
//! [`PayPolicies`].

mod attendance;
mod deductions;
mod earnings;
mod pay_calculator;
mod policies;
mod rounding;
mod tax;
mod working_days;

pub use attendance::{
    AttendanceCredits, AttendanceSummary, DEFAULT_HALF_DAY_CREDIT, DEFAULT_STANDARD_DAILY_HOURS,
    aggregate_attendance, worked_days,
};
pub use deductions::{DeductionPolicy, DeductionRule};
pub use earnings::{ConfiguredEarnings, EarningsPolicy, EarningsRule, OvertimeRule};
pub use pay_calculator::{
    NEGATIVE_NET_PAY, NET_PAY_CLAMPED, NegativeNetPayPolicy, PayInputs,
    WORKED_DAYS_EXCEED_WORKING_DAYS, calculate_pay,
};
pub use policies::PayPolicies;
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use tax::{DEFAULT_FLAT_TAX_RATE, TaxBracket, TaxPolicy, TaxRule};
pub use working_days::{
    HolidayCalendar, NoHolidays, PublicHolidayCalendar, is_weekday, working_days,
    working_days_with_calendar,
};
