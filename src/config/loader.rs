//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, ExclusionsConfig, PolicyConfig, RecipientsConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml      # Status codes, thresholds, milestone years
/// ├── recipients.yaml  # HR, review, and test mailboxes
/// └── exclusions.yaml  # Denylisted employee/manager names
/// ```
///
/// # Example
///
/// ```no_run
/// use anniversary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Gap threshold: {} days", loader.policy().rehire_gap_threshold_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let recipients = Self::load_yaml::<RecipientsConfig>(&path.join("recipients.yaml"))?;
        let exclusions = Self::load_yaml::<ExclusionsConfig>(&path.join("exclusions.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(policy, recipients, exclusions),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        self.config.policy()
    }

    /// Returns the fixed recipients.
    pub fn recipients(&self) -> &RecipientsConfig {
        self.config.recipients()
    }

    /// Returns the exclusion rules.
    pub fn exclusions(&self) -> &ExclusionsConfig {
        self.config.exclusions()
    }
}
