//! Configuration types for the anniversary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

/// Business-policy knobs for classification, reconciliation, and selection.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// The status code that means "terminated"; every other code is
    /// treated as active or on leave.
    pub terminated_status_code: i32,
    /// Fixed width the tax identifier is zero-padded to.
    pub person_id_width: usize,
    /// Break-in-service threshold, in days, separating "short gap" rehires
    /// from "long gap" rehires in review reporting.
    pub rehire_gap_threshold_days: i64,
    /// Minimum whole years of service required before a person appears in
    /// any tenure anniversary selection.
    pub minimum_service_years: i64,
    /// Years of service celebrated with the milestone ("star") greeting.
    pub milestone_years: Vec<i64>,
    /// Day of the month on which the monthly rosters go out in production.
    pub monthly_report_day: u32,
    /// Manager label used when the position exists but no active manager
    /// occupies it.
    pub vacancy_label: String,
}

/// Fixed notification recipients.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientsConfig {
    /// The HR mailbox receiving the monthly rosters.
    pub hr: String,
    /// The reviewer mailbox receiving the rehired-people roster.
    pub rehire_review: String,
    /// Address every message is redirected to in the test environment.
    pub test: String,
}

/// Business-rule exclusions: people suppressed from all notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionsConfig {
    /// Case-insensitive substrings matched against employee names.
    pub employee_name_contains: Vec<String>,
    /// Case-insensitive substrings matched against manager names.
    pub manager_name_contains: Vec<String>,
}

impl ExclusionsConfig {
    /// Returns true if the employee name matches a denylisted entry.
    pub fn matches_employee(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.employee_name_contains
            .iter()
            .any(|entry| !entry.is_empty() && name.contains(&entry.to_lowercase()))
    }

    /// Returns true if the manager name matches a denylisted entry.
    pub fn matches_manager(&self, manager_name: &str) -> bool {
        let manager_name = manager_name.to_lowercase();
        self.manager_name_contains
            .iter()
            .any(|entry| !entry.is_empty() && manager_name.contains(&entry.to_lowercase()))
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    policy: PolicyConfig,
    recipients: RecipientsConfig,
    exclusions: ExclusionsConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        policy: PolicyConfig,
        recipients: RecipientsConfig,
        exclusions: ExclusionsConfig,
    ) -> Self {
        Self {
            policy,
            recipients,
            exclusions,
        }
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the fixed recipients.
    pub fn recipients(&self) -> &RecipientsConfig {
        &self.recipients
    }

    /// Returns the exclusion rules.
    pub fn exclusions(&self) -> &ExclusionsConfig {
        &self.exclusions
    }
}
