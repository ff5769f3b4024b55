//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll configurations from
//! YAML files, including metadata, tax and deduction rules, earnings rules,
//! attendance credits, and public holidays.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata, HolidaysConfig, PolicyConfig};
