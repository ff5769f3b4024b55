//! Period processing for the Payroll Engine.
//!
//! This module orchestrates a payroll run over a period: resolving working
//! days, calculating every payable employee in parallel, committing rows and
//! totals atomically, and signalling the processed period. The collaborators
//! it reads from and writes to are traits, with [`InMemoryStore`] as the
//! bundled implementation.

mod events;
mod memory;
mod processor;
mod store;
mod summary;

pub use events::{ChannelEventSink, PeriodEventSink, TracingEventSink};
pub use memory::InMemoryStore;
pub use processor::PayrollProcessor;
pub use store::{AttendanceStore, EmployeeDirectory, PayrollStore};
pub use summary::{EmployeeFailure, PeriodRun};
