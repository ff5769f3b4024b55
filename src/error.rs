//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving periods,
//! calculating pay and processing payroll runs.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::PeriodNotFound {
///     period_id: "2026-01".to_string(),
/// };
/// assert_eq!(error.to_string(), "Payroll period not found: 2026-01");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Period dates are malformed or the period has no working days.
    #[error("Invalid payroll period '{period_id}': {message}")]
    InvalidPeriod {
        /// The ID of the offending period (empty when not known).
        period_id: String,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A single employee's calculation inputs violate the calculator contract.
    #[error("Invalid input for employee '{employee_id}', field '{field}': {message}")]
    InvalidInput {
        /// The employee whose inputs were invalid.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A lifecycle action was requested from a status that does not allow it.
    #[error("Cannot {action} payroll period '{period_id}' from status '{from}'")]
    InvalidStateTransition {
        /// The period the transition was requested on.
        period_id: String,
        /// The status the period was in.
        from: String,
        /// The action that was refused (e.g., "process").
        action: String,
    },

    /// A division by a zero denominator was attempted.
    #[error("Division by zero: {context}")]
    DivisionByZero {
        /// What was being divided.
        context: String,
    },

    /// A sum exceeded the representable decimal range.
    #[error("Arithmetic overflow: {context}")]
    Overflow {
        /// What was being summed.
        context: String,
    },

    /// The requested payroll period does not exist.
    #[error("Payroll period not found: {period_id}")]
    PeriodNotFound {
        /// The ID that was looked up.
        period_id: String,
    },

    /// A collaborator store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A spawned per-employee calculation task panicked or was cancelled.
    #[error("Calculation task failed: {message}")]
    TaskFailed {
        /// A description of the task failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that only concern one employee's calculation.
    ///
    /// The period processor skips the employee and records the failure for
    /// these; every other error aborts the run.
    pub fn is_employee_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. } | EngineError::DivisionByZero { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
