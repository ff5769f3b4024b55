//! Collaborator contracts consumed and produced to by the period processor.
//!
//! Each trait returns `Send` futures so a run can fan employee work out
//! across tokio tasks.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, Payroll, PayrollPeriod, PeriodStatus, PeriodTotals};

/// Source of employee records.
pub trait EmployeeDirectory: Send + Sync {
    /// Lists the active employees of a company.
    fn list_active_employees(
        &self,
        company_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<Employee>>> + Send;
}

/// Source of attendance records.
pub trait AttendanceStore: Send + Sync {
    /// Returns an employee's records dated within `[start, end]`.
    fn get_attendance_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = EngineResult<Vec<AttendanceRecord>>> + Send;
}

/// Persistence for payroll periods and payroll rows.
pub trait PayrollStore: Send + Sync {
    /// Loads a period by id.
    fn load_period(
        &self,
        period_id: &str,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;

    /// Moves a processable period to `processing`.
    ///
    /// The status check and the write happen as one conditional update, so
    /// two runs can never claim the same period.
    fn claim_period(
        &self,
        period_id: &str,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;

    /// Returns a `processing` period to `draft` after a failed run.
    fn release_period(
        &self,
        period_id: &str,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;

    /// Inserts a row, replacing any row with the same
    /// `(employee_id, payroll_period_id, version)`.
    ///
    /// A single-row write; [`commit_run`](Self::commit_run) is the all or
    /// nothing form a run uses.
    fn upsert_payroll(&self, payroll: Payroll) -> impl Future<Output = EngineResult<()>> + Send;

    /// Writes a period's totals and moves it to `status`.
    ///
    /// The move goes through the period lifecycle: only `calculated` is
    /// accepted, from `processing`, via [`PayrollPeriod::complete`]. Any other
    /// target status is an [`EngineError::InvalidStateTransition`].
    ///
    /// [`EngineError::InvalidStateTransition`]: crate::error::EngineError::InvalidStateTransition
    fn update_period_totals(
        &self,
        period_id: &str,
        totals: PeriodTotals,
        status: PeriodStatus,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;

    /// Persists every row of a run and completes the period, all or nothing.
    fn commit_run(
        &self,
        period_id: &str,
        payrolls: Vec<Payroll>,
        totals: PeriodTotals,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;

    /// Returns every row of a period, superseded ones included.
    fn payrolls_for_period(
        &self,
        period_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<Payroll>>> + Send;

    /// Marks a `calculated` period's current rows superseded and reopens it.
    fn supersede_period(
        &self,
        period_id: &str,
    ) -> impl Future<Output = EngineResult<PayrollPeriod>> + Send;
}
