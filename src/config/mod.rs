//! Configuration loading and management for the anniversary engine.
//!
//! This module provides functionality to load the engine configuration from
//! YAML files: business-policy thresholds, fixed recipients, and exclusion
//! rules.
//!
//! # Example
//!
//! ```no_run
//! use anniversary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Monthly report day: {}", config.policy().monthly_report_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, ExclusionsConfig, PolicyConfig, RecipientsConfig};
