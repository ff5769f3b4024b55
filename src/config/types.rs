//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::{
    AttendanceCredits, ConfiguredEarnings, DeductionRule, EarningsRule, NegativeNetPayPolicy,
    OvertimeRule, PayPolicies, PublicHolidayCalendar, TaxRule,
};
use crate::models::PublicHoliday;

/// Metadata about the engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the configuration.
    pub name: String,
    /// The ISO 4217 currency code amounts are denominated in.
    pub currency: String,
    /// The version or effective date of the configuration.
    pub version: String,
}

/// Pay policies from policies.yaml.
///
/// Every section is optional; a missing section takes the standard default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Income tax rule.
    #[serde(default)]
    pub tax: TaxRule,
    /// Non-tax deduction rule.
    #[serde(default)]
    pub deductions: DeductionRule,
    /// Overtime earnings rule.
    #[serde(default)]
    pub overtime: OvertimeRule,
    /// Allowance earnings rule.
    #[serde(default)]
    pub allowances: EarningsRule,
    /// Bonus earnings rule.
    #[serde(default)]
    pub bonus: EarningsRule,
    /// Attendance credit settings.
    #[serde(default)]
    pub attendance: AttendanceCredits,
    /// Handling of net pay below zero.
    #[serde(default)]
    pub negative_net_pay: NegativeNetPayPolicy,
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// Public holidays excluded from working days.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Configuration metadata.
    metadata: EngineMetadata,
    /// Pay policies.
    policies: PolicyConfig,
    /// Public holidays (sorted by date).
    holidays: Vec<PublicHoliday>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        policies: PolicyConfig,
        holidays: Vec<PublicHoliday>,
    ) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            metadata,
            policies,
            holidays: sorted_holidays,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the configured policy rules.
    pub fn policy_config(&self) -> &PolicyConfig {
        &self.policies
    }

    /// Returns all public holidays.
    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }

    /// Builds the strategy bundle a payroll run calculates with.
    pub fn policies(&self) -> PayPolicies {
        let config = &self.policies;
        PayPolicies::default()
            .with_tax(config.tax.clone())
            .with_deductions(config.deductions.clone())
            .with_earnings(ConfiguredEarnings {
                overtime: config.overtime.clone(),
                allowances: config.allowances.clone(),
                bonus: config.bonus.clone(),
            })
            .with_calendar(PublicHolidayCalendar::new(&self.holidays))
            .with_credits(config.attendance)
            .with_negative_net_pay(config.negative_net_pay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_policy_config_uses_defaults() {
        let config: PolicyConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.tax, TaxRule::default());
        assert_eq!(config.deductions, DeductionRule::None);
        assert_eq!(config.negative_net_pay, NegativeNetPayPolicy::Flag);
        assert_eq!(config.attendance, AttendanceCredits::default());
    }

    #[test]
    fn test_policy_config_from_yaml() {
        let yaml = r#"
tax:
  type: progressive
  brackets:
    - up_to: "1000"
      rate: "0"
    - rate: "0.2"
deductions:
  type: fixed
  amount: "50.00"
negative_net_pay: clamp
attendance:
  half_day_credit: "1"
"#;
        let config: PolicyConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.tax, TaxRule::Progressive { ref brackets } if brackets.len() == 2));
        assert!(matches!(config.deductions, DeductionRule::Fixed { .. }));
        assert_eq!(config.negative_net_pay, NegativeNetPayPolicy::Clamp);
        assert_eq!(config.attendance.half_day_credit, rust_decimal::Decimal::ONE);
    }

    #[test]
    fn test_holidays_sorted_on_construction() {
        let holiday = |m: u32, d: u32, name: &str| PublicHoliday {
            date: NaiveDate::from_ymd_opt(2026, m, d).unwrap(),
            name: name.to_string(),
            region: "national".to_string(),
        };
        let config = EngineConfig::new(
            EngineMetadata {
                name: "Test".to_string(),
                currency: "USD".to_string(),
                version: "1".to_string(),
            },
            PolicyConfig::default(),
            vec![holiday(12, 25, "Christmas Day"), holiday(1, 1, "New Year's Day")],
        );
        assert_eq!(config.holidays()[0].name, "New Year's Day");
    }
}
