//! Anniversary selection models.
//!
//! These are the read-only projections produced by the anniversary
//! selector: each carries the underlying record plus the figures the
//! notifications interpolate.

use serde::{Deserialize, Serialize};

use super::employee::EmployeeRecord;
use super::tenure::ConsolidatedTenure;

/// A valid employee selected for a tenure anniversary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureAnniversary {
    /// The surviving record for the person.
    pub record: EmployeeRecord,
    /// Whole years of service at the reference date: floor of
    /// `(reference - hire_date).days / 365`.
    pub years_of_service: i64,
}

/// Rehired people whose consolidated first-hire anniversary falls in the
/// selected month, split by the configured gap threshold for
/// differentiated review reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehiredSelection {
    /// People who returned within the gap threshold at least once.
    pub short_gap: Vec<ConsolidatedTenure>,
    /// People whose every break in service met or exceeded the threshold.
    pub long_gap: Vec<ConsolidatedTenure>,
}

impl RehiredSelection {
    /// Total selected people across both sub-lists.
    pub fn len(&self) -> usize {
        self.short_gap.len() + self.long_gap.len()
    }

    /// Returns true when neither sub-list has entries.
    pub fn is_empty(&self) -> bool {
        self.short_gap.is_empty() && self.long_gap.is_empty()
    }
}
