//! Payroll Engine
//!
//! This crate calculates payroll for a company's payroll period: it counts the
//! period's working days, aggregates each employee's attendance into worked
//! days, pro-rates base salary into basic, gross and net pay under pluggable
//! tax, deduction and earnings policies, and rolls the results up into period
//! totals while driving the period's lifecycle.
//!
//! # Example
//!
//! ```
//! use payroll_engine::calculation::{calculate_pay, DeductionRule, NegativeNetPayPolicy, PayInputs, TaxRule};
//! use payroll_engine::models::Employee;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let employee = Employee {
//!     id: "emp_001".to_string(),
//!     company_id: "acme".to_string(),
//!     base_salary: Decimal::new(3000, 0),
//!     hire_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     termination_date: None,
//!     is_active: true,
//! };
//!
//! let result = calculate_pay(
//!     &employee,
//!     &PayInputs::new(22, Decimal::new(22, 0)),
//!     &TaxRule::default(),
//!     &DeductionRule::None,
//!     NegativeNetPayPolicy::Flag,
//! )
//! .unwrap();
//! assert_eq!(result.net_pay.to_string(), "2700.00");
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
