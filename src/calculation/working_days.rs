//! Period resolution: counting the working days of a payroll period.
//!
//! The working-day count is the denominator used to pro-rate a monthly
//! salary. The base algorithm counts Monday to Friday; holiday calendars
//! are an extension point layered on top.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

/// A source of non-working days that fall on weekdays.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// A calendar built from configured public holidays.
#[derive(Debug, Clone, Default)]
pub struct PublicHolidayCalendar {
    dates: HashSet<NaiveDate>,
}

impl PublicHolidayCalendar {
    /// Builds a calendar from a list of public holidays.
    pub fn new(holidays: &[PublicHoliday]) -> Self {
        Self {
            dates: holidays.iter().map(|h| h.date).collect(),
        }
    }

    /// Returns the number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar holds no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for PublicHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the weekdays in `[start, end]` inclusive.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when `start > end`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::working_days;
/// use chrono::NaiveDate;
///
/// // January 2026 has 22 weekdays
/// let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(working_days(start, end).unwrap(), 22);
/// ```
pub fn working_days(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    working_days_with_calendar(start, end, &NoHolidays)
}

/// Counts the weekdays in `[start, end]` that are not holidays.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when `start > end`.
pub fn working_days_with_calendar(
    start: NaiveDate,
    end: NaiveDate,
    calendar: &dyn HolidayCalendar,
) -> EngineResult<u32> {
    if start > end {
        return Err(EngineError::InvalidPeriod {
            period_id: String::new(),
            message: format!("start date {} is after end date {}", start, end),
        });
    }

    let count = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_weekday(*d) && !calendar.is_holiday(*d))
        .count();

    u32::try_from(count).map_err(|_| EngineError::InvalidPeriod {
        period_id: String::new(),
        message: format!(
            "{} working days between {} and {} exceed the supported count",
            count, start, end
        ),
    })
}
