//! Attendance aggregation.
//!
//! Turns raw daily attendance records into the worked-day, worked-hour and
//! overtime-hour counts the pay calculator consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus};

/// Worked-day credit for a `half_day` record.
pub const DEFAULT_HALF_DAY_CREDIT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Hours in a standard working day; time beyond it counts as overtime.
pub const DEFAULT_STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// How attendance statuses and hours translate into credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCredits {
    /// Worked-day credit for a `half_day` record.
    #[serde(default = "default_half_day_credit")]
    pub half_day_credit: Decimal,
    /// Hours per day before overtime accrues.
    #[serde(default = "default_standard_daily_hours")]
    pub standard_daily_hours: Decimal,
}

fn default_half_day_credit() -> Decimal {
    DEFAULT_HALF_DAY_CREDIT
}

fn default_standard_daily_hours() -> Decimal {
    DEFAULT_STANDARD_DAILY_HOURS
}

impl Default for AttendanceCredits {
    fn default() -> Self {
        Self {
            half_day_credit: DEFAULT_HALF_DAY_CREDIT,
            standard_daily_hours: DEFAULT_STANDARD_DAILY_HOURS,
        }
    }
}

impl AttendanceCredits {
    /// Returns the worked-day credit earned by a status.
    pub fn credit_for(&self, status: AttendanceStatus) -> Decimal {
        match status {
            AttendanceStatus::Present | AttendanceStatus::Late => Decimal::ONE,
            AttendanceStatus::HalfDay => self.half_day_credit,
            AttendanceStatus::Absent => Decimal::ZERO,
        }
    }
}

/// Aggregated attendance of one employee over a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Credited worked days.
    pub worked_days: Decimal,
    /// Hours between check-in and check-out on attended days.
    pub worked_hours: Decimal,
    /// Hours beyond the standard day on attended days.
    pub overtime_hours: Decimal,
    /// Number of `present` records.
    pub present: u32,
    /// Number of `late` records.
    pub late: u32,
    /// Number of `half_day` records.
    pub half_day: u32,
    /// Number of `absent` records.
    pub absent: u32,
}

/// Aggregates an employee's attendance records within `[start, end]`.
///
/// Records dated outside the range, or belonging to another employee, are
/// ignored. A working day with no record earns nothing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when `start > end`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{aggregate_attendance, AttendanceCredits};
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let day = |d: u32, status| AttendanceRecord {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, d).unwrap(),
///     check_in: NaiveTime::from_hms_opt(9, 0, 0),
///     check_out: NaiveTime::from_hms_opt(18, 0, 0),
///     status,
/// };
/// let records = vec![
///     day(5, AttendanceStatus::Present),
///     day(6, AttendanceStatus::HalfDay),
///     day(7, AttendanceStatus::Absent),
/// ];
///
/// let summary = aggregate_attendance(
///     "emp_001",
///     &records,
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     &AttendanceCredits::default(),
/// )
/// .unwrap();
///
/// assert_eq!(summary.worked_days, Decimal::new(15, 1)); // 1.5 days
/// assert_eq!(summary.overtime_hours, Decimal::new(2, 0)); // 1h on each attended day
/// ```
pub fn aggregate_attendance(
    employee_id: &str,
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
    credits: &AttendanceCredits,
) -> EngineResult<AttendanceSummary> {
    if start > end {
        return Err(EngineError::InvalidPeriod {
            period_id: String::new(),
            message: format!("start date {} is after end date {}", start, end),
        });
    }

    let mut summary = AttendanceSummary::default();

    for record in records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
    {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::HalfDay => summary.half_day += 1,
            AttendanceStatus::Absent => summary.absent += 1,
        }

        if !record.status.is_attended() {
            continue;
        }

        summary.worked_days += credits.credit_for(record.status);

        let hours = record.hours_worked();
        summary.worked_hours += hours;
        if hours > credits.standard_daily_hours {
            summary.overtime_hours += hours - credits.standard_daily_hours;
        }
    }

    Ok(summary)
}

/// Returns only the credited worked days for an employee within `[start, end]`.
pub fn worked_days(
    employee_id: &str,
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
    credits: &AttendanceCredits,
) -> EngineResult<Decimal> {
    aggregate_attendance(employee_id, records, start, end, credits).map(|s| s.worked_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(
        employee_id: &str,
        day: NaiveDate,
        status: AttendanceStatus,
        hours: Option<(u32, u32)>,
    ) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: employee_id.to_string(),
            date: day,
            check_in: hours.and_then(|(start, _)| NaiveTime::from_hms_opt(start, 0, 0)),
            check_out: hours.and_then(|(_, end)| NaiveTime::from_hms_opt(end, 0, 0)),
            status,
        }
    }

    fn january() -> (NaiveDate, NaiveDate) {
        (date(2026, 1, 1), date(2026, 1, 31))
    }

    #[test]
    fn test_counts_present_late_and_half_day() {
        let records = vec![
            make_record("emp_001", date(2026, 1, 5), AttendanceStatus::Present, None),
            make_record("emp_001", date(2026, 1, 6), AttendanceStatus::Late, None),
            make_record("emp_001", date(2026, 1, 7), AttendanceStatus::HalfDay, None),
            make_record("emp_001", date(2026, 1, 8), AttendanceStatus::Absent, None),
        ];
        let (start, end) = january();
        let summary =
            aggregate_attendance("emp_001", &records, start, end, &AttendanceCredits::default())
                .unwrap();

        assert_eq!(summary.worked_days, dec("2.5"));
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.half_day, 1);
        assert_eq!(summary.absent, 1);
    }

    #[test]
    fn test_half_day_credit_is_configurable() {
        let records = vec![make_record(
            "emp_001",
            date(2026, 1, 7),
            AttendanceStatus::HalfDay,
            None,
        )];
        let credits = AttendanceCredits {
            half_day_credit: Decimal::ONE,
            ..AttendanceCredits::default()
        };
        let (start, end) = january();
        assert_eq!(
            worked_days("emp_001", &records, start, end, &credits).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_default_half_day_credit_is_half() {
        assert_eq!(DEFAULT_HALF_DAY_CREDIT, dec("0.5"));
        assert_eq!(DEFAULT_STANDARD_DAILY_HOURS, dec("8"));
    }

    #[test]
    fn test_records_outside_range_excluded() {
        let records = vec![
            make_record("emp_001", date(2025, 12, 31), AttendanceStatus::Present, None),
            make_record("emp_001", date(2026, 1, 1), AttendanceStatus::Present, None),
            make_record("emp_001", date(2026, 1, 31), AttendanceStatus::Present, None),
            make_record("emp_001", date(2026, 2, 1), AttendanceStatus::Present, None),
        ];
        let (start, end) = january();
        assert_eq!(
            worked_days("emp_001", &records, start, end, &AttendanceCredits::default()).unwrap(),
            dec("2")
        );
    }

    #[test]
    fn test_other_employees_excluded() {
        let records = vec![
            make_record("emp_001", date(2026, 1, 5), AttendanceStatus::Present, None),
            make_record("emp_002", date(2026, 1, 5), AttendanceStatus::Present, None),
        ];
        let (start, end) = january();
        assert_eq!(
            worked_days("emp_001", &records, start, end, &AttendanceCredits::default()).unwrap(),
            dec("1")
        );
    }

    #[test]
    fn test_no_records_means_zero_credit() {
        let (start, end) = january();
        let summary =
            aggregate_attendance("emp_001", &[], start, end, &AttendanceCredits::default())
                .unwrap();
        assert_eq!(summary, AttendanceSummary::default());
    }

    #[test]
    fn test_overtime_hours_beyond_standard_day() {
        let records = vec![
            make_record("emp_001", date(2026, 1, 5), AttendanceStatus::Present, Some((8, 18))),
            make_record("emp_001", date(2026, 1, 6), AttendanceStatus::Present, Some((9, 17))),
            make_record("emp_001", date(2026, 1, 7), AttendanceStatus::Late, Some((10, 19))),
        ];
        let (start, end) = january();
        let summary =
            aggregate_attendance("emp_001", &records, start, end, &AttendanceCredits::default())
                .unwrap();

        assert_eq!(summary.worked_hours, dec("27"));
        assert_eq!(summary.overtime_hours, dec("3"));
    }

    #[test]
    fn test_absent_hours_not_counted() {
        let records = vec![make_record(
            "emp_001",
            date(2026, 1, 5),
            AttendanceStatus::Absent,
            Some((8, 20)),
        )];
        let (start, end) = january();
        let summary =
            aggregate_attendance("emp_001", &records, start, end, &AttendanceCredits::default())
                .unwrap();
        assert_eq!(summary.worked_hours, Decimal::ZERO);
        assert_eq!(summary.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = worked_days(
            "emp_001",
            &[],
            date(2026, 2, 1),
            date(2026, 1, 1),
            &AttendanceCredits::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_credits_deserialize_with_defaults() {
        let credits: AttendanceCredits = serde_json::from_str("{}").unwrap();
        assert_eq!(credits, AttendanceCredits::default());
        let credits: AttendanceCredits =
            serde_json::from_str(r#"{ "half_day_credit": "1" }"#).unwrap();
        assert_eq!(credits.half_day_credit, Decimal::ONE);
    }
}
