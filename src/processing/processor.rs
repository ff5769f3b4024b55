//! Period processing: the orchestration of a whole payroll run.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{PayPolicies, aggregate_attendance};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayCalculation, Payroll, PayrollPeriod, PeriodTotals};

use super::events::{PeriodEventSink, TracingEventSink};
use super::store::{AttendanceStore, EmployeeDirectory, PayrollStore};
use super::summary::{EmployeeFailure, PeriodRun};

/// Runs payroll periods against a set of collaborators.
///
/// One store type supplies employees, attendance and persistence; the
/// processor fans per-employee work out over tokio tasks and commits the
/// whole run at once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::calculation::PayPolicies;
/// use payroll_engine::models::{PayrollPeriod, PeriodStatus};
/// use payroll_engine::processing::{InMemoryStore, PayrollProcessor};
/// use chrono::NaiveDate;
///
/// # tokio_test_block(async {
/// let store = Arc::new(InMemoryStore::new());
/// store.add_period(PayrollPeriod::draft(
///     "2026-01",
///     "acme",
///     "January 2026",
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
/// )).unwrap();
///
/// let processor = PayrollProcessor::new(store, PayPolicies::default());
/// let run = processor.process_period("2026-01").await.unwrap();
/// assert_eq!(run.period.status, PeriodStatus::Calculated);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub struct PayrollProcessor<S> {
    store: Arc<S>,
    policies: PayPolicies,
    sink: Arc<dyn PeriodEventSink>,
}

impl<S> PayrollProcessor<S>
where
    S: EmployeeDirectory + AttendanceStore + PayrollStore + 'static,
{
    /// Creates a processor that reports processed periods to the log.
    pub fn new(store: Arc<S>, policies: PayPolicies) -> Self {
        Self::with_sink(store, policies, Arc::new(TracingEventSink))
    }

    /// Creates a processor reporting processed periods to `sink`.
    pub fn with_sink(store: Arc<S>, policies: PayPolicies, sink: Arc<dyn PeriodEventSink>) -> Self {
        Self {
            store,
            policies,
            sink,
        }
    }

    /// The policies runs calculate with.
    pub fn policies(&self) -> &PayPolicies {
        &self.policies
    }

    /// Processes every payable employee of a period and completes it.
    ///
    /// Employees whose inputs are invalid are skipped and listed in
    /// [`PeriodRun::failures`]; every other error aborts the run, returns the
    /// period to `draft` and leaves no rows behind.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PeriodNotFound`] if the period does not exist.
    /// - [`EngineError::InvalidStateTransition`] unless the period is `draft`
    ///   or `pending`; the period is left unmodified.
    /// - [`EngineError::InvalidPeriod`] if the dates are inverted or the
    ///   period has no working days; the period is left unmodified.
    /// - Any storage or task error raised after the period was claimed.
    pub async fn process_period(&self, period_id: &str) -> EngineResult<PeriodRun> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();

        let period = self.store.load_period(period_id).await?;
        info!(
            run_id = %run_id,
            period_id = %period.id,
            company_id = %period.company_id,
            start_date = %period.start_date,
            end_date = %period.end_date,
            status = %period.status,
            "Starting payroll run"
        );

        if !period.status.can_be_processed() {
            warn!(run_id = %run_id, period_id = %period.id, status = %period.status, "Period cannot be processed");
            return Err(EngineError::InvalidStateTransition {
                period_id: period.id.clone(),
                from: period.status.to_string(),
                action: "process".to_string(),
            });
        }

        let working_days = self.resolve_working_days(&period)?;
        debug!(run_id = %run_id, period_id = %period.id, working_days, "Resolved working days");

        let claimed = self.store.claim_period(period_id).await?;

        match self.run_claimed(run_id, &claimed, working_days).await {
            Ok((period, payrolls, failures)) => {
                let totals = period.totals.unwrap_or_default();
                let duration_us = started.elapsed().as_micros() as u64;
                info!(
                    run_id = %run_id,
                    period_id = %period.id,
                    employee_count = totals.employee_count,
                    skipped = failures.len(),
                    total_gross = %totals.total_gross,
                    total_deductions = %totals.total_deductions,
                    total_net = %totals.total_net,
                    duration_us,
                    "Payroll run completed"
                );
                self.sink.period_processed(&period);
                Ok(PeriodRun {
                    run_id,
                    period,
                    payrolls,
                    failures,
                    duration_us,
                })
            }
            Err(err) => {
                warn!(run_id = %run_id, period_id = %period_id, error = %err, "Payroll run failed, reverting period to draft");
                if let Err(release_err) = self.store.release_period(period_id).await {
                    warn!(run_id = %run_id, period_id = %period_id, error = %release_err, "Failed to revert period");
                }
                Err(err)
            }
        }
    }

    /// Supersedes a `calculated` period so it can be processed again.
    ///
    /// Current rows are kept with status `superseded`; the next run writes
    /// rows under the bumped run version.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidStateTransition`] unless the period is
    /// `calculated`.
    pub async fn supersede_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        let period = self.store.supersede_period(period_id).await?;
        info!(
            period_id = %period.id,
            run_version = period.run_version,
            "Payroll period superseded"
        );
        Ok(period)
    }

    fn resolve_working_days(&self, period: &PayrollPeriod) -> EngineResult<u32> {
        period.validate()?;
        let working_days = self
            .policies
            .working_days(period.start_date, period.end_date)
            .map_err(|err| match err {
                EngineError::InvalidPeriod { message, .. } => EngineError::InvalidPeriod {
                    period_id: period.id.clone(),
                    message,
                },
                other => other,
            })?;
        if working_days == 0 {
            return Err(EngineError::InvalidPeriod {
                period_id: period.id.clone(),
                message: format!(
                    "no working days between {} and {}",
                    period.start_date, period.end_date
                ),
            });
        }
        Ok(working_days)
    }

    async fn run_claimed(
        &self,
        run_id: Uuid,
        period: &PayrollPeriod,
        working_days: u32,
    ) -> EngineResult<(PayrollPeriod, Vec<Payroll>, Vec<EmployeeFailure>)> {
        let employees: Vec<Employee> = self
            .store
            .list_active_employees(&period.company_id)
            .await?
            .into_iter()
            .filter(|e| e.is_payable_between(period.start_date, period.end_date))
            .collect();
        debug!(run_id = %run_id, period_id = %period.id, employees = employees.len(), "Calculating employees");

        let mut tasks = JoinSet::new();
        for employee in employees {
            let store = Arc::clone(&self.store);
            let policies = self.policies.clone();
            let (start, end) = (period.start_date, period.end_date);
            tasks.spawn(async move {
                let result =
                    calculate_employee(store.as_ref(), &policies, &employee, start, end, working_days)
                        .await;
                (employee.id, result)
            });
        }

        let mut calculations: Vec<PayCalculation> = Vec::new();
        let mut failures: Vec<EmployeeFailure> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (employee_id, result) = joined.map_err(|e| EngineError::TaskFailed {
                message: e.to_string(),
            })?;
            match result {
                Ok(calculation) => {
                    if calculation.flagged {
                        warn!(
                            run_id = %run_id,
                            employee_id = %employee_id,
                            net_pay = %calculation.net_pay,
                            "Negative net pay flagged for review"
                        );
                    }
                    calculations.push(calculation);
                }
                Err(err) if err.is_employee_recoverable() => {
                    warn!(run_id = %run_id, employee_id = %employee_id, error = %err, "Skipping employee");
                    failures.push(EmployeeFailure {
                        employee_id,
                        error: err,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        calculations.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        failures.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        let mut totals = PeriodTotals::default();
        let mut payrolls: Vec<Payroll> = Vec::with_capacity(calculations.len());
        for calc in calculations {
            totals.accumulate(calc.gross_pay, calc.tax_amount, calc.deductions, calc.net_pay)?;
            payrolls.push(Payroll::from_calculation(&period.id, period.run_version, calc));
        }

        let committed = self
            .store
            .commit_run(&period.id, payrolls.clone(), totals)
            .await?;
        Ok((committed, payrolls, failures))
    }
}

async fn calculate_employee<S>(
    store: &S,
    policies: &PayPolicies,
    employee: &Employee,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    working_days: u32,
) -> EngineResult<PayCalculation>
where
    S: AttendanceStore,
{
    let records = store.get_attendance_records(&employee.id, start, end).await?;
    let attendance = aggregate_attendance(&employee.id, &records, start, end, policies.credits())?;
    policies.calculate(employee, working_days, &attendance)
}
