//! Attendance record model.
//!
//! Attendance records are consumed from the attendance store as plain
//! aggregation inputs; the engine never owns their lifecycle.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The recorded outcome of one employee's working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee attended on time.
    Present,
    /// The employee did not attend.
    Absent,
    /// The employee attended but arrived late.
    Late,
    /// The employee attended for half the day.
    HalfDay,
}

impl AttendanceStatus {
    /// Returns true if the status earns worked-day credit.
    pub fn is_attended(&self) -> bool {
        !matches!(self, AttendanceStatus::Absent)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::HalfDay => write!(f, "half_day"),
        }
    }
}

/// One employee's attendance on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Clock-in time, if recorded.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// The attendance outcome.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Returns the hours between check-in and check-out.
    ///
    /// Records missing either time, or with check-out before check-in,
    /// contribute zero hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     check_in: NaiveTime::from_hms_opt(9, 0, 0),
    ///     check_out: NaiveTime::from_hms_opt(17, 30, 0),
    ///     status: AttendanceStatus::Present,
    /// };
    /// assert_eq!(record.hours_worked(), Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn hours_worked(&self) -> Decimal {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if check_out > check_in => {
                let minutes = (check_out - check_in).num_minutes();
                Decimal::new(minutes, 0) / Decimal::new(60, 0)
            }
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(check_in: Option<(u32, u32)>, check_out: Option<(u32, u32)>) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            check_in: check_in.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            check_out: check_out.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn test_hours_worked_full_day() {
        let record = make_record(Some((9, 0)), Some((17, 0)));
        assert_eq!(record.hours_worked(), Decimal::new(8, 0));
    }

    #[test]
    fn test_hours_worked_missing_check_out() {
        let record = make_record(Some((9, 0)), None);
        assert_eq!(record.hours_worked(), Decimal::ZERO);
    }

    #[test]
    fn test_hours_worked_check_out_before_check_in() {
        let record = make_record(Some((17, 0)), Some((9, 0)));
        assert_eq!(record.hours_worked(), Decimal::ZERO);
    }

    #[test]
    fn test_hours_worked_partial_hour() {
        let record = make_record(Some((9, 0)), Some((13, 45)));
        assert_eq!(record.hours_worked(), Decimal::new(475, 2));
    }

    #[test]
    fn test_absent_is_not_attended() {
        assert!(!AttendanceStatus::Absent.is_attended());
        assert!(AttendanceStatus::Present.is_attended());
        assert!(AttendanceStatus::Late.is_attended());
        assert!(AttendanceStatus::HalfDay.is_attended());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        let status: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn test_deserialize_record_without_times() {
        let json = r#"{
            "employee_id": "emp_002",
            "date": "2026-01-06",
            "status": "absent"
        }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert!(record.check_in.is_none());
        assert_eq!(record.hours_worked(), Decimal::ZERO);
    }
}
