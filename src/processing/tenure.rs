//! Tenure reconciliation for rehired people.
//!
//! A rehired person has several employment records whose naive per-record
//! tenure double-counts overlapping stints and misattributes service time.
//! This module merges the stints into a consolidated timeline: intervals are
//! sorted by start date and an interval whose start falls at or before the
//! previous end is absorbed, extending the end to the later of the two.
//! Gaps between merged intervals are never credited.
//!
//! The anniversary reference date is always the earliest hire date across
//! all records, regardless of merging.

use chrono::NaiveDate;

use crate::models::{ConsolidatedTenure, EmploymentInterval, PersonGroup};

/// Builds the per-record employment intervals for one person, sorted by
/// start date ascending and deduplicated on (hire, termination).
///
/// An open stint (no termination date) ends at the reference date. A
/// stint starting after the reference date carries no elapsed service
/// yet and is not credited; without this rule an open future-dated
/// contract would end before it starts and count negative days.
pub fn build_intervals(group: &PersonGroup, reference: NaiveDate) -> Vec<EmploymentInterval> {
    let mut intervals: Vec<EmploymentInterval> = group
        .records
        .iter()
        .filter(|record| record.hire_date <= reference)
        .map(|record| EmploymentInterval {
            start: record.hire_date,
            end: record.termination_date.unwrap_or(reference),
        })
        .collect();
    intervals.sort();
    intervals.dedup();
    intervals
}

/// Merges a sorted interval list so no day is counted twice.
///
/// Scanning left to right, an interval is merged into the previous one when
/// its start is at or before the previous end (touching, back-to-back, or
/// overlapping); merging extends the end to the later of the two ends.
///
/// # Example
///
/// ```
/// use anniversary_engine::models::EmploymentInterval;
/// use anniversary_engine::processing::merge_intervals;
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let merged = merge_intervals(&[
///     EmploymentInterval { start: d(2019, 1, 1), end: d(2019, 10, 1) },
///     EmploymentInterval { start: d(2019, 10, 1), end: d(2021, 1, 1) },
/// ]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].end, d(2021, 1, 1));
/// ```
pub fn merge_intervals(intervals: &[EmploymentInterval]) -> Vec<EmploymentInterval> {
    let mut merged: Vec<EmploymentInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(*interval),
        }
    }
    merged
}

/// The shortest gap, in days, between a termination and the following
/// hire across the person's stints, scanning records in hire order.
///
/// Open stints (no termination) start no gap. Overlapping stints yield a
/// negative gap, which still counts as the shortest return.
fn shortest_gap_days(group: &PersonGroup) -> Option<i64> {
    let mut records: Vec<_> = group.records.iter().collect();
    records.sort_by_key(|r| r.hire_date);

    let mut shortest: Option<i64> = None;
    for pair in records.windows(2) {
        if let Some(termination) = pair[0].termination_date {
            let gap = (pair[1].hire_date - termination).num_days();
            shortest = Some(shortest.map_or(gap, |s| s.min(gap)));
        }
    }
    shortest
}

/// Consolidates one rehired person's records into a single tenure figure.
///
/// Returns `None` for a group with no records. Total credited days are the
/// sum over merged intervals; whole years are `total_days / 365`, floored.
pub fn consolidate(group: &PersonGroup, reference: NaiveDate) -> Option<ConsolidatedTenure> {
    let intervals = build_intervals(group, reference);
    let merged = merge_intervals(&intervals);

    let first_hire_date = group.records.iter().map(|r| r.hire_date).min()?;
    let name = group
        .records
        .iter()
        .max_by_key(|r| r.hire_date)
        .map(|r| r.name.clone())?;

    let total_days_employed: i64 = merged.iter().map(EmploymentInterval::days).sum();
    let years_of_service = total_days_employed / 365;

    Some(ConsolidatedTenure {
        person_id: group.person_id.clone(),
        name,
        first_hire_date,
        shortest_gap_days: shortest_gap_days(group),
        intervals: merged,
        total_days_employed,
        years_of_service,
    })
}

/// Consolidates every rehired group, keeping the classifier's ordering.
pub fn consolidate_all(groups: &[PersonGroup], reference: NaiveDate) -> Vec<ConsolidatedTenure> {
    groups
        .iter()
        .filter_map(|group| consolidate(group, reference))
        .collect()
}
