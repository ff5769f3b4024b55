//! In-memory collaborator store for testing and embedding.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, Payroll, PayrollPeriod, PayrollStatus, PeriodStatus, PeriodTotals,
};

use super::store::{AttendanceStore, EmployeeDirectory, PayrollStore};

#[derive(Debug, Default)]
struct MemoryState {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    periods: HashMap<String, PayrollPeriod>,
    payrolls: Vec<Payroll>,
    unavailable_attendance: HashSet<String>,
}

impl MemoryState {
    fn period_mut(&mut self, period_id: &str) -> EngineResult<&mut PayrollPeriod> {
        self.periods
            .get_mut(period_id)
            .ok_or_else(|| EngineError::PeriodNotFound {
                period_id: period_id.to_string(),
            })
    }

    fn upsert(&mut self, payroll: Payroll) {
        match self.payrolls.iter_mut().find(|p| {
            p.employee_id == payroll.employee_id
                && p.payroll_period_id == payroll.payroll_period_id
                && p.version == payroll.version
        }) {
            Some(existing) => *existing = payroll,
            None => self.payrolls.push(payroll),
        }
    }
}

/// A [`PayrollStore`], [`EmployeeDirectory`] and [`AttendanceStore`] held in
/// memory behind a single lock.
///
/// Every write takes the one write lock, so [`PayrollStore::commit_run`] is
/// atomic with respect to every reader.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(|_| poisoned())
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(|_| poisoned())
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut state = self.write()?;
        state.employees.retain(|e| e.id != employee.id);
        state.employees.push(employee);
        Ok(())
    }

    /// Adds attendance records.
    pub fn add_attendance(
        &self,
        records: impl IntoIterator<Item = AttendanceRecord>,
    ) -> EngineResult<()> {
        self.write()?.attendance.extend(records);
        Ok(())
    }

    /// Adds or replaces a period.
    pub fn add_period(&self, period: PayrollPeriod) -> EngineResult<()> {
        self.write()?.periods.insert(period.id.clone(), period);
        Ok(())
    }

    /// Makes attendance lookups for an employee fail with a storage error.
    pub fn make_attendance_unavailable(&self, employee_id: &str) -> EngineResult<()> {
        self.write()?
            .unavailable_attendance
            .insert(employee_id.to_string());
        Ok(())
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage {
        message: "in-memory store lock poisoned".to_string(),
    }
}

impl EmployeeDirectory for InMemoryStore {
    async fn list_active_employees(&self, company_id: &str) -> EngineResult<Vec<Employee>> {
        let state = self.read()?;
        Ok(state
            .employees
            .iter()
            .filter(|e| e.company_id == company_id && e.is_active)
            .cloned()
            .collect())
    }
}

impl AttendanceStore for InMemoryStore {
    async fn get_attendance_records(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let state = self.read()?;
        if state.unavailable_attendance.contains(employee_id) {
            return Err(EngineError::Storage {
                message: format!("attendance unavailable for employee '{}'", employee_id),
            });
        }
        Ok(state
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}

impl PayrollStore for InMemoryStore {
    async fn load_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        let state = self.read()?;
        state
            .periods
            .get(period_id)
            .cloned()
            .ok_or_else(|| EngineError::PeriodNotFound {
                period_id: period_id.to_string(),
            })
    }

    async fn claim_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        let mut state = self.write()?;
        let period = state.period_mut(period_id)?;
        period.begin_processing()?;
        Ok(period.clone())
    }

    async fn release_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        let mut state = self.write()?;
        let period = state.period_mut(period_id)?;
        period.revert_to_draft()?;
        Ok(period.clone())
    }

    async fn upsert_payroll(&self, payroll: Payroll) -> EngineResult<()> {
        self.write()?.upsert(payroll);
        Ok(())
    }

    async fn update_period_totals(
        &self,
        period_id: &str,
        totals: PeriodTotals,
        status: PeriodStatus,
    ) -> EngineResult<PayrollPeriod> {
        let mut state = self.write()?;
        let period = state.period_mut(period_id)?;
        if status != PeriodStatus::Calculated {
            return Err(EngineError::InvalidStateTransition {
                period_id: period.id.clone(),
                from: period.status.to_string(),
                action: format!("set totals with status {}", status),
            });
        }
        period.complete(totals)?;
        Ok(period.clone())
    }

    async fn commit_run(
        &self,
        period_id: &str,
        payrolls: Vec<Payroll>,
        totals: PeriodTotals,
    ) -> EngineResult<PayrollPeriod> {
        let mut state = self.write()?;

        // Complete a copy first so a refused transition writes nothing
        let mut period = state.period_mut(period_id)?.clone();
        period.complete(totals)?;

        for payroll in payrolls {
            state.upsert(payroll);
        }
        state.periods.insert(period.id.clone(), period.clone());
        Ok(period)
    }

    async fn payrolls_for_period(&self, period_id: &str) -> EngineResult<Vec<Payroll>> {
        let state = self.read()?;
        if !state.periods.contains_key(period_id) {
            return Err(EngineError::PeriodNotFound {
                period_id: period_id.to_string(),
            });
        }
        Ok(state
            .payrolls
            .iter()
            .filter(|p| p.payroll_period_id == period_id)
            .cloned()
            .collect())
    }

    async fn supersede_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        let mut state = self.write()?;

        let mut period = state.period_mut(period_id)?.clone();
        period.reopen()?;

        for payroll in state
            .payrolls
            .iter_mut()
            .filter(|p| p.payroll_period_id == period_id && p.is_current())
        {
            payroll.status = PayrollStatus::Superseded;
        }
        state.periods.insert(period.id.clone(), period.clone());
        Ok(period)
    }
}
