//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::PayPolicies;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, HolidaysConfig, PolicyConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── engine.yaml    # Configuration metadata
/// ├── policies.yaml  # Tax, deduction, earnings and attendance rules
/// └── holidays.yaml  # Public holidays (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// println!("Loaded configuration: {}", loader.metadata().name);
/// let policies = loader.policies();
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` or `policies.yaml` is missing, or if
    /// any file present contains invalid YAML. A missing `holidays.yaml`
    /// means no holidays.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let policies = Self::load_yaml::<PolicyConfig>(&path.join("policies.yaml"))?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidaysConfig>(&holidays_path)?.holidays
        } else {
            Vec::new()
        };

        Ok(Self {
            config: EngineConfig::new(metadata, policies, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Builds the strategy bundle described by the configuration.
    pub fn policies(&self) -> PayPolicies {
        self.config.policies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{AttendanceSummary, NegativeNetPayPolicy, TaxRule};
    use crate::models::Employee;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/standard"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().name, "Standard Payroll");
        assert_eq!(loader.metadata().currency, "USD");
    }

    #[test]
    fn test_standard_policies_pay_standard_net() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy_config = loader.config().policy_config();

        assert_eq!(policy_config.tax, TaxRule::Flat { rate: dec("0.10") });
        assert_eq!(policy_config.attendance.half_day_credit, dec("0.5"));
        assert_eq!(policy_config.negative_net_pay, NegativeNetPayPolicy::Flag);
    }

    #[test]
    fn test_standard_holidays_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.config().holidays();
        assert!(!holidays.is_empty());
        assert_eq!(holidays[0].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_loaded_policies_calculate() {
        let policies = ConfigLoader::load(config_path()).unwrap().policies();
        let employee = Employee {
            id: "emp_001".to_string(),
            company_id: "acme".to_string(),
            base_salary: dec("3000"),
            hire_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            termination_date: None,
            is_active: true,
        };
        let attendance = AttendanceSummary {
            worked_days: dec("22"),
            ..AttendanceSummary::default()
        };
        let result = policies.calculate(&employee, 22, &attendance).unwrap();
        assert_eq!(result.net_pay, dec("2700.00"));
    }

    #[test]
    fn test_standard_calendar_excludes_new_year() {
        let policies = ConfigLoader::load(config_path()).unwrap().policies();
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(policies.working_days(start, end).unwrap(), 21);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
