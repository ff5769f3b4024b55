//! Payroll period and public holiday models.
//!
//! This module contains the [`PayrollPeriod`] type with its lifecycle
//! [`PeriodStatus`], the [`PeriodTotals`] written at the end of a run, and
//! [`PublicHoliday`] entries used by holiday calendars.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a public holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     name: "New Year's Day".to_string(),
///     region: "national".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
    /// The region where this holiday applies (e.g., "national").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// Lifecycle state of a payroll period.
///
/// ```text
/// draft/pending -> processing -> calculated -> approved -> paid
/// ```
///
/// The engine drives a period up to `calculated`; `approved` and `paid` are
/// reached by human action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Created by an administrator, not yet processed.
    Draft,
    /// Queued for processing.
    Pending,
    /// A processing run currently owns the period.
    Processing,
    /// All payrolls computed and totals written.
    Calculated,
    /// Approved for payment.
    Approved,
    /// Payment issued.
    Paid,
}

impl PeriodStatus {
    /// Returns true if a processing run may start from this status.
    pub fn can_be_processed(&self) -> bool {
        matches!(self, PeriodStatus::Draft | PeriodStatus::Pending)
    }

    /// Returns the snake_case name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Draft => "draft",
            PeriodStatus::Pending => "pending",
            PeriodStatus::Processing => "processing",
            PeriodStatus::Calculated => "calculated",
            PeriodStatus::Approved => "approved",
            PeriodStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated money totals of one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of tax plus other deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Number of payroll rows contributing to the totals.
    pub employee_count: u32,
}

impl PeriodTotals {
    /// Adds one payroll result to the running totals.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if any total leaves the decimal
    /// range; the totals are left unchanged.
    pub fn accumulate(
        &mut self,
        gross_pay: Decimal,
        tax_amount: Decimal,
        deductions: Decimal,
        net_pay: Decimal,
    ) -> EngineResult<()> {
        let overflow = |total: &str| EngineError::Overflow {
            context: format!("period {} after {} employees", total, self.employee_count),
        };
        let total_gross = self
            .total_gross
            .checked_add(gross_pay)
            .ok_or_else(|| overflow("total_gross"))?;
        let total_deductions = tax_amount
            .checked_add(deductions)
            .and_then(|d| self.total_deductions.checked_add(d))
            .ok_or_else(|| overflow("total_deductions"))?;
        let total_net = self
            .total_net
            .checked_add(net_pay)
            .ok_or_else(|| overflow("total_net"))?;

        self.total_gross = total_gross;
        self.total_deductions = total_deductions;
        self.total_net = total_net;
        self.employee_count += 1;
        Ok(())
    }
}

/// A dated payroll window for one company.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PeriodStatus};
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::draft(
///     "2026-01",
///     "acme",
///     "January 2026",
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
/// );
///
/// assert_eq!(period.status, PeriodStatus::Draft);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier for the period.
    pub id: String,
    /// The company that owns the period.
    pub company_id: String,
    /// Display name (e.g., "January 2026").
    pub name: String,
    /// First payable day (inclusive).
    pub start_date: NaiveDate,
    /// Last payable day (inclusive).
    pub end_date: NaiveDate,
    /// The day payment is issued.
    pub pay_date: NaiveDate,
    /// Current lifecycle state.
    pub status: PeriodStatus,
    /// Totals, set only once the period reaches `calculated`.
    #[serde(default)]
    pub totals: Option<PeriodTotals>,
    /// Version of the payroll rows belonging to the current run.
    #[serde(default = "default_version")]
    pub run_version: u32,
}

fn default_version() -> u32 {
    1
}

impl PayrollPeriod {
    /// Creates a new period in `draft` status with no totals.
    pub fn draft(
        id: impl Into<String>,
        company_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pay_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            company_id: company_id.into(),
            name: name.into(),
            start_date,
            end_date,
            pay_date,
            status: PeriodStatus::Draft,
            totals: None,
            run_version: 1,
        }
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Verifies `start_date <= end_date`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidPeriod {
                period_id: self.id.clone(),
                message: format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            });
        }
        Ok(())
    }

    /// Moves a `draft` or `pending` period into `processing`.
    pub fn begin_processing(&mut self) -> EngineResult<()> {
        if !self.status.can_be_processed() {
            return Err(self.refuse("process"));
        }
        self.status = PeriodStatus::Processing;
        Ok(())
    }

    /// Writes the run totals and moves `processing` to `calculated`.
    pub fn complete(&mut self, totals: PeriodTotals) -> EngineResult<()> {
        if self.status != PeriodStatus::Processing {
            return Err(self.refuse("complete"));
        }
        self.totals = Some(totals);
        self.status = PeriodStatus::Calculated;
        Ok(())
    }

    /// Returns a `processing` period to `draft` after a failed run.
    pub fn revert_to_draft(&mut self) -> EngineResult<()> {
        if self.status != PeriodStatus::Processing {
            return Err(self.refuse("revert"));
        }
        self.totals = None;
        self.status = PeriodStatus::Draft;
        Ok(())
    }

    /// Reopens a `calculated` period so it can be processed again.
    ///
    /// Totals are cleared and the run version is bumped; rows of the
    /// previous version are kept by the store as superseded.
    pub fn reopen(&mut self) -> EngineResult<()> {
        if self.status != PeriodStatus::Calculated {
            return Err(self.refuse("supersede"));
        }
        self.totals = None;
        self.run_version += 1;
        self.status = PeriodStatus::Draft;
        Ok(())
    }

    /// Marks a `calculated` period as approved.
    pub fn approve(&mut self) -> EngineResult<()> {
        if self.status != PeriodStatus::Calculated {
            return Err(self.refuse("approve"));
        }
        self.status = PeriodStatus::Approved;
        Ok(())
    }

    /// Marks an `approved` period as paid.
    pub fn mark_paid(&mut self) -> EngineResult<()> {
        if self.status != PeriodStatus::Approved {
            return Err(self.refuse("pay"));
        }
        self.status = PeriodStatus::Paid;
        Ok(())
    }

    fn refuse(&self, action: &str) -> EngineError {
        EngineError::InvalidStateTransition {
            period_id: self.id.clone(),
            from: self.status.to_string(),
            action: action.to_string(),
        }
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

    fn create_test_period() -> PayrollPeriod {
        PayrollPeriod::draft(
            "2026-01",
            "acme",
            "January 2026",
            date(2026, 1, 1),
            date(2026, 1, 31),
            date(2026, 2, 5),
        )
    }

    fn sample_totals() -> PeriodTotals {
        PeriodTotals {
            total_gross: dec("3000.00"),
            total_deductions: dec("300.00"),
            total_net: dec("2700.00"),
            employee_count: 1,
        }
    }

    #[test]
    fn test_only_draft_and_pending_can_be_processed() {
        assert!(PeriodStatus::Draft.can_be_processed());
        assert!(PeriodStatus::Pending.can_be_processed());
        assert!(!PeriodStatus::Processing.can_be_processed());
        assert!(!PeriodStatus::Calculated.can_be_processed());
        assert!(!PeriodStatus::Approved.can_be_processed());
        assert!(!PeriodStatus::Paid.can_be_processed());
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = create_test_period();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
        assert!(!period.contains_date(date(2025, 12, 31)));
        assert!(!period.contains_date(date(2026, 2, 1)));
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let mut period = create_test_period();
        period.start_date = date(2026, 2, 1);
        match period.validate() {
            Err(EngineError::InvalidPeriod { period_id, .. }) => assert_eq!(period_id, "2026-01"),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let mut period = create_test_period();
        period.begin_processing().unwrap();
        assert_eq!(period.status, PeriodStatus::Processing);
        assert!(period.totals.is_none());

        period.complete(sample_totals()).unwrap();
        assert_eq!(period.status, PeriodStatus::Calculated);
        assert_eq!(period.totals, Some(sample_totals()));

        period.approve().unwrap();
        assert_eq!(period.status, PeriodStatus::Approved);
        period.mark_paid().unwrap();
        assert_eq!(period.status, PeriodStatus::Paid);
    }

    #[test]
    fn test_begin_processing_from_calculated_fails() {
        let mut period = create_test_period();
        period.begin_processing().unwrap();
        period.complete(sample_totals()).unwrap();

        let err = period.begin_processing().unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidStateTransition {
                period_id: "2026-01".to_string(),
                from: "calculated".to_string(),
                action: "process".to_string(),
            }
        );
        assert_eq!(period.status, PeriodStatus::Calculated);
        assert_eq!(period.totals, Some(sample_totals()));
    }

    #[test]
    fn test_complete_requires_processing() {
        let mut period = create_test_period();
        assert!(period.complete(sample_totals()).is_err());
        assert!(period.totals.is_none());
    }

    #[test]
    fn test_revert_clears_status_to_draft() {
        let mut period = create_test_period();
        period.status = PeriodStatus::Pending;
        period.begin_processing().unwrap();
        period.revert_to_draft().unwrap();
        assert_eq!(period.status, PeriodStatus::Draft);
    }

    #[test]
    fn test_reopen_bumps_version() {
        let mut period = create_test_period();
        period.begin_processing().unwrap();
        period.complete(sample_totals()).unwrap();
        period.reopen().unwrap();
        assert_eq!(period.status, PeriodStatus::Draft);
        assert_eq!(period.run_version, 2);
        assert!(period.totals.is_none());
    }

    #[test]
    fn test_reopen_refused_once_approved() {
        let mut period = create_test_period();
        period.begin_processing().unwrap();
        period.complete(sample_totals()).unwrap();
        period.approve().unwrap();
        assert!(matches!(
            period.reopen(),
            Err(EngineError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_mark_paid_requires_approval() {
        let mut period = create_test_period();
        assert!(period.mark_paid().is_err());
    }

    #[test]
    fn test_totals_accumulate() {
        let mut totals = PeriodTotals::default();
        totals
            .accumulate(dec("3000.00"), dec("300.00"), dec("0"), dec("2700.00"))
            .unwrap();
        totals
            .accumulate(dec("1500.00"), dec("150.00"), dec("50.00"), dec("1300.00"))
            .unwrap();
        assert_eq!(totals.total_gross, dec("4500.00"));
        assert_eq!(totals.total_deductions, dec("500.00"));
        assert_eq!(totals.total_net, dec("4000.00"));
        assert_eq!(totals.employee_count, 2);
    }

    #[test]
    fn test_totals_overflow_leaves_totals_unchanged() {
        let large = dec("45000000000000000000000000000");
        let mut totals = PeriodTotals::default();
        totals
            .accumulate(large, Decimal::ZERO, Decimal::ZERO, large)
            .unwrap();

        let result = totals.accumulate(large, Decimal::ZERO, Decimal::ZERO, large);
        assert!(matches!(result, Err(EngineError::Overflow { .. })));
        assert_eq!(totals.total_gross, large);
        assert_eq!(totals.employee_count, 1);
    }

    #[test]
    fn test_deserialize_period() {
        let json = r#"{
            "id": "2026-01",
            "company_id": "acme",
            "name": "January 2026",
            "start_date": "2026-01-01",
            "end_date": "2026-01-31",
            "pay_date": "2026-02-05",
            "status": "pending"
        }"#;
        let period: PayrollPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.status, PeriodStatus::Pending);
        assert_eq!(period.run_version, 1);
        assert!(period.totals.is_none());
    }

    #[test]
    fn test_deserialize_public_holiday_default_region() {
        let json = r#"{ "date": "2026-12-25", "name": "Christmas Day" }"#;
        let holiday: PublicHoliday = serde_json::from_str(json).unwrap();
        assert_eq!(holiday.region, "national");
    }
}
