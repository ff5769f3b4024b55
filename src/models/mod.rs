//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod employee;
mod payroll;
mod payroll_period;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::Employee;
pub use payroll::{PayCalculation, Payroll, PayrollStatus};
pub use payroll_period::{PayrollPeriod, PeriodStatus, PeriodTotals, PublicHoliday};
