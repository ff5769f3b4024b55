//! Result of one period processing run.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Payroll, PayrollPeriod};

/// An employee left out of a run because of a recoverable error.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFailure {
    /// The skipped employee.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub error: EngineError,
}

impl Serialize for EmployeeFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("EmployeeFailure", 2)?;
        state.serialize_field("employee_id", &self.employee_id)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Everything a successful `process_period` call produced.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodRun {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// The period as committed, in `calculated` status.
    pub period: PayrollPeriod,
    /// The rows committed by this run, ordered by employee id.
    pub payrolls: Vec<Payroll>,
    /// Employees skipped because of recoverable errors.
    pub failures: Vec<EmployeeFailure>,
    /// Wall-clock duration of the run in microseconds.
    pub duration_us: u64,
}

impl PeriodRun {
    /// Net pay summed over the committed rows.
    pub fn total_net(&self) -> Decimal {
        self.payrolls.iter().map(|p| p.net_pay).sum()
    }

    /// Returns true if any employee was skipped.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Finds the committed row for an employee.
    pub fn payroll_for(&self, employee_id: &str) -> Option<&Payroll> {
        self.payrolls.iter().find(|p| p.employee_id == employee_id)
    }
}
