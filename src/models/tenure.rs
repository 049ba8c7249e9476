//! Tenure models: employment intervals and consolidated service timelines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employment stint as a closed date interval.
///
/// `end` is the termination date when present, otherwise the reference
/// date of the batch run (the stint is still open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmploymentInterval {
    /// First day of the stint.
    pub start: NaiveDate,
    /// Last credited day of the stint.
    pub end: NaiveDate,
}

impl EmploymentInterval {
    /// Number of credited days in this interval.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// The consolidated service timeline of a rehired person.
///
/// Built by merging overlapping or back-to-back employment intervals so
/// that no day of service is counted twice; gaps between stints are not
/// credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedTenure {
    /// Normalized tax identifier.
    pub person_id: String,
    /// The person's name, taken from the most recent record.
    pub name: String,
    /// Earliest hire date across all records. Anniversaries anchor to
    /// this date, never to the most recent hire.
    pub first_hire_date: NaiveDate,
    /// The merged, non-overlapping interval list, sorted ascending.
    pub intervals: Vec<EmploymentInterval>,
    /// Total credited days across all merged intervals.
    pub total_days_employed: i64,
    /// Whole years of service: `total_days_employed / 365`, floored.
    /// Partial years do not count.
    pub years_of_service: i64,
    /// The shortest observed gap, in days, between a termination and the
    /// following rehire. `None` when no terminated stint precedes another.
    pub shortest_gap_days: Option<i64>,
}

impl ConsolidatedTenure {
    /// Returns true if the person returned within the configured gap
    /// threshold at least once.
    pub fn is_short_gap_return(&self, gap_threshold_days: i64) -> bool {
        self.shortest_gap_days
            .is_some_and(|gap| gap < gap_threshold_days)
    }
}
