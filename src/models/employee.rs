//! Employee model.
//!
//! This module defines the Employee struct as consumed from the employee
//! directory. The engine never owns or mutates employee records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose pay is calculated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The company the employee belongs to.
    pub company_id: String,
    /// Monthly base salary in the company currency.
    pub base_salary: Decimal,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// The date employment ended, if it has.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Whether the employee record is active in the directory.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee should be paid for a period.
    ///
    /// An employee is payable when the record is active, they were hired on
    /// or before the period end, and they were not terminated before the
    /// period start.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     company_id: "acme".to_string(),
    ///     base_salary: Decimal::new(3000, 0),
    ///     hire_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    ///     termination_date: None,
    ///     is_active: true,
    /// };
    /// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
    /// assert!(employee.is_payable_between(start, end));
    /// ```
    pub fn is_payable_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if !self.is_active || self.hire_date > end {
            return false;
        }
        self.termination_date.is_none_or(|terminated| terminated >= start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            company_id: "acme".to_string(),
            base_salary: dec("3000.00"),
            hire_date: date(2024, 6, 1),
            termination_date: None,
            is_active: true,
        }
    }

    #[test]
    fn test_deserialize_employee_defaults_active() {
        let json = r#"{
            "id": "emp_001",
            "company_id": "acme",
            "base_salary": "3000.00",
            "hire_date": "2024-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.base_salary, dec("3000.00"));
        assert!(employee.is_active);
        assert_eq!(employee.termination_date, None);
    }

    #[test]
    fn test_payable_when_active_and_employed() {
        let employee = create_test_employee();
        assert!(employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }

    #[test]
    fn test_not_payable_when_inactive() {
        let mut employee = create_test_employee();
        employee.is_active = false;
        assert!(!employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }

    #[test]
    fn test_not_payable_when_hired_after_period() {
        let mut employee = create_test_employee();
        employee.hire_date = date(2026, 2, 1);
        assert!(!employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }

    #[test]
    fn test_payable_when_hired_on_last_day() {
        let mut employee = create_test_employee();
        employee.hire_date = date(2026, 1, 31);
        assert!(employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }

    #[test]
    fn test_not_payable_when_terminated_before_period() {
        let mut employee = create_test_employee();
        employee.termination_date = Some(date(2025, 12, 31));
        assert!(!employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }

    #[test]
    fn test_payable_when_terminated_mid_period() {
        let mut employee = create_test_employee();
        employee.termination_date = Some(date(2026, 1, 15));
        assert!(employee.is_payable_between(date(2026, 1, 1), date(2026, 1, 31)));
    }
}
