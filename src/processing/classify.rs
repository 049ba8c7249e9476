//! Person classification.
//!
//! Groups normalized records by person and assigns each person exactly one
//! category, in strict priority order: denylist exclusion first, then
//! rehired, terminated-all, missing-personal-email, missing-valid-manager,
//! and finally valid. Rehired people are routed to the tenure reconciler;
//! valid people keep only their most recent active record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, PersonGroup};

/// The mutually exclusive category assigned to a person for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonClassification {
    /// One active record survives and proceeds to anniversary selection.
    Valid,
    /// Every record carries the terminated status code.
    TerminatedAll,
    /// No active record has a personal email address.
    MissingPersonalEmail,
    /// No active record has a named, non-terminated manager (and the
    /// position is not merely vacant).
    MissingValidManager,
    /// More than one record, mixing active and terminated stints; routed
    /// to consolidated tenure reconciliation.
    Rehired,
}

impl std::fmt::Display for PersonClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonClassification::Valid => write!(f, "Valid"),
            PersonClassification::TerminatedAll => write!(f, "TerminatedAll"),
            PersonClassification::MissingPersonalEmail => write!(f, "MissingPersonalEmail"),
            PersonClassification::MissingValidManager => write!(f, "MissingValidManager"),
            PersonClassification::Rehired => write!(f, "Rehired"),
        }
    }
}

/// The disjoint output partitions of one classification pass.
#[derive(Debug, Default)]
pub struct Partitions {
    /// One surviving record per valid person.
    pub valid: Vec<EmployeeRecord>,
    /// Fully terminated people, with all their records.
    pub terminated_all: Vec<PersonGroup>,
    /// People with no personal email, active records only.
    pub missing_personal_email: Vec<PersonGroup>,
    /// People with no valid manager, active records only.
    pub missing_valid_manager: Vec<PersonGroup>,
    /// Rehired people, with all their records, for tenure reconciliation.
    pub rehired: Vec<PersonGroup>,
    /// People dropped by the exclusion denylist.
    pub excluded: usize,
    /// Groups skipped because they held no usable records.
    pub skipped_empty: usize,
    /// Typed errors for people matching no category; each person here is
    /// excluded, never treated as valid.
    pub invariant_violations: Vec<EngineError>,
}

/// Groups records by `person_id`, in ascending id order.
pub fn group_by_person(records: Vec<EmployeeRecord>) -> Vec<PersonGroup> {
    let mut by_person: BTreeMap<String, Vec<EmployeeRecord>> = BTreeMap::new();
    for record in records {
        by_person
            .entry(record.person_id.clone())
            .or_default()
            .push(record);
    }
    by_person
        .into_iter()
        .map(|(person_id, records)| PersonGroup { person_id, records })
        .collect()
}

/// Assigns the category for one person.
///
/// Returns `None` when the person matches the exclusion denylist and must
/// appear in no output partition. The priority order is fixed: rehired is
/// checked before the simpler categories because historical records can
/// mask email/manager issues that the reconciliation path handles itself.
pub fn classify_person(group: &PersonGroup, config: &EngineConfig) -> Option<PersonClassification> {
    let exclusions = config.exclusions();
    if group.records.iter().any(|r| {
        exclusions.matches_employee(&r.name)
            || r.manager_name
                .as_deref()
                .is_some_and(|m| exclusions.matches_manager(m))
    }) {
        return None;
    }

    let terminated_code = config.policy().terminated_status_code;
    let active: Vec<&EmployeeRecord> = group
        .records
        .iter()
        .filter(|r| !r.is_terminated(terminated_code))
        .collect();
    let any_terminated = group
        .records
        .iter()
        .any(|r| r.is_terminated(terminated_code));

    if group.records.len() > 1 && !active.is_empty() && any_terminated {
        return Some(PersonClassification::Rehired);
    }
    if active.is_empty() {
        return Some(PersonClassification::TerminatedAll);
    }
    if !active.iter().any(|r| r.has_personal_email()) {
        return Some(PersonClassification::MissingPersonalEmail);
    }
    if !active.iter().any(|r| r.has_valid_manager(terminated_code)) {
        // A position whose every occupant-manager is terminated is simply
        // vacant; the person stays valid with the sentinel label.
        let all_managers_terminated = active
            .iter()
            .all(|r| r.manager_status_code == terminated_code);
        if all_managers_terminated {
            return Some(PersonClassification::Valid);
        }
        return Some(PersonClassification::MissingValidManager);
    }
    Some(PersonClassification::Valid)
}

/// Picks the surviving record for a valid person: the most recent active
/// record by hire date. When the manager position is vacant (every active
/// record's manager status is terminated), the manager name is replaced by
/// the configured vacancy label and the stale manager email is dropped.
///
/// A valid verdict guarantees an active record, so a group reaching this
/// point without one is a [`EngineError::ClassificationInvariant`].
fn select_valid_record(group: &PersonGroup, config: &EngineConfig) -> EngineResult<EmployeeRecord> {
    let policy = config.policy();
    let terminated_code = policy.terminated_status_code;
    let active: Vec<&EmployeeRecord> = group
        .records
        .iter()
        .filter(|r| !r.is_terminated(terminated_code))
        .collect();

    let most_recent =
        active
            .iter()
            .max_by_key(|r| r.hire_date)
            .ok_or_else(|| EngineError::ClassificationInvariant {
                person_id: group.person_id.clone(),
            })?;
    let mut record = (*most_recent).clone();

    let position_vacant = active
        .iter()
        .all(|r| r.manager_status_code == terminated_code);
    if position_vacant {
        record.manager_name = Some(policy.vacancy_label.clone());
        record.manager_email = None;
    }
    Ok(record)
}

/// Filters a group down to its active records, preserving order.
fn active_only(group: PersonGroup, terminated_code: i32) -> PersonGroup {
    PersonGroup {
        person_id: group.person_id,
        records: group
            .records
            .into_iter()
            .filter(|r| !r.is_terminated(terminated_code))
            .collect(),
    }
}

/// Partitions the full normalized population.
///
/// Each person lands in exactly one partition (or is excluded/skipped).
/// No input is mutated; the partitions are fresh derived tables.
pub fn classify(records: Vec<EmployeeRecord>, config: &EngineConfig) -> Partitions {
    let terminated_code = config.policy().terminated_status_code;
    let mut partitions = Partitions::default();

    for group in group_by_person(records) {
        if group.records.is_empty() {
            warn!(person_id = %group.person_id, "Empty person group skipped");
            partitions.skipped_empty += 1;
            continue;
        }

        match classify_person(&group, config) {
            None => {
                info!(person_id = %group.person_id, "Person excluded by denylist");
                partitions.excluded += 1;
            }
            Some(PersonClassification::Rehired) => partitions.rehired.push(group),
            Some(PersonClassification::TerminatedAll) => partitions.terminated_all.push(group),
            Some(PersonClassification::MissingPersonalEmail) => partitions
                .missing_personal_email
                .push(active_only(group, terminated_code)),
            Some(PersonClassification::MissingValidManager) => partitions
                .missing_valid_manager
                .push(active_only(group, terminated_code)),
            Some(PersonClassification::Valid) => match select_valid_record(&group, config) {
                Ok(record) => partitions.valid.push(record),
                Err(error) => {
                    warn!(
                        person_id = %group.person_id,
                        %error,
                        "Person matched no category; excluded"
                    );
                    partitions.invariant_violations.push(error);
                }
            },
        }
    }

    partitions
}
