//! Anniversary selection.
//!
//! Given a reference date, filters the classified and reconciled population
//! into the "upcoming month" and "today" anniversary sets, for both tenure
//! and birth-date anniversaries. The reference date is always passed in
//! explicitly and evaluated fresh per call; nothing here reads the clock.
//!
//! All selections are read-only projections, sorted by month and day of the
//! anniversary date for stable report ordering, independent of year.

use chrono::{Datelike, NaiveDate};

use crate::config::PolicyConfig;
use crate::models::{ConsolidatedTenure, EmployeeRecord, RehiredSelection, TenureAnniversary};

/// The calendar month following the reference date's month.
///
/// # Example
///
/// ```
/// use anniversary_engine::processing::next_month;
/// use chrono::NaiveDate;
///
/// let december = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
/// assert_eq!(next_month(december), 1);
/// ```
pub fn next_month(reference: NaiveDate) -> u32 {
    reference.month() % 12 + 1
}

/// Whole years elapsed between a start date and the reference date,
/// floored: `(reference - start).days / 365`.
pub fn years_between(start: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - start).num_days() / 365
}

fn month_day(date: NaiveDate) -> (u32, u32) {
    (date.month(), date.day())
}

/// Valid people whose hire-date anniversary falls in the month after the
/// reference date, with at least the configured minimum years of service.
pub fn tenure_next_month(
    valid: &[EmployeeRecord],
    reference: NaiveDate,
    policy: &PolicyConfig,
) -> Vec<TenureAnniversary> {
    let month = next_month(reference);
    let mut selected: Vec<TenureAnniversary> = valid
        .iter()
        .filter(|record| record.hire_date.month() == month)
        .map(|record| TenureAnniversary {
            record: record.clone(),
            years_of_service: years_between(record.hire_date, reference),
        })
        .filter(|entry| entry.years_of_service >= policy.minimum_service_years)
        .collect();
    selected.sort_by_key(|entry| month_day(entry.record.hire_date));
    selected
}

/// Valid people whose hire-date day and month match the reference date,
/// with at least the configured minimum years of service.
pub fn tenure_today(
    valid: &[EmployeeRecord],
    reference: NaiveDate,
    policy: &PolicyConfig,
) -> Vec<TenureAnniversary> {
    valid
        .iter()
        .filter(|record| month_day(record.hire_date) == month_day(reference))
        .map(|record| TenureAnniversary {
            record: record.clone(),
            years_of_service: years_between(record.hire_date, reference),
        })
        .filter(|entry| entry.years_of_service >= policy.minimum_service_years)
        .collect()
}

/// Rehired people whose consolidated first-hire anniversary falls in the
/// month after the reference date, split by the configured gap threshold.
///
/// The anniversary month is always that of the earliest hire; the
/// per-person service years come from the merged timeline, so the
/// `>= minimum_service_years` filter credits only time actually worked.
pub fn rehired_next_month(
    consolidated: &[ConsolidatedTenure],
    reference: NaiveDate,
    policy: &PolicyConfig,
) -> RehiredSelection {
    let month = next_month(reference);
    let mut eligible: Vec<&ConsolidatedTenure> = consolidated
        .iter()
        .filter(|tenure| tenure.first_hire_date.month() == month)
        .filter(|tenure| tenure.years_of_service >= policy.minimum_service_years)
        .collect();
    eligible.sort_by_key(|tenure| month_day(tenure.first_hire_date));

    let mut selection = RehiredSelection::default();
    for tenure in eligible {
        if tenure.is_short_gap_return(policy.rehire_gap_threshold_days) {
            selection.short_gap.push(tenure.clone());
        } else {
            selection.long_gap.push(tenure.clone());
        }
    }
    selection
}

/// Valid people whose birthday falls in the month after the reference
/// date. Birth-date selections carry no tenure-length requirement.
pub fn birthdays_next_month(valid: &[EmployeeRecord], reference: NaiveDate) -> Vec<EmployeeRecord> {
    let month = next_month(reference);
    let mut selected: Vec<EmployeeRecord> = valid
        .iter()
        .filter(|record| record.birth_date.month() == month)
        .cloned()
        .collect();
    selected.sort_by_key(|record| month_day(record.birth_date));
    selected
}

/// Valid people whose birthday day and month match the reference date.
pub fn birthdays_today(valid: &[EmployeeRecord], reference: NaiveDate) -> Vec<EmployeeRecord> {
    valid
        .iter()
        .filter(|record| month_day(record.birth_date) == month_day(reference))
        .cloned()
        .collect()
}

/// Splits a today-selection into milestone ("star") anniversaries and
/// regular ones, by the configured celebrated years.
pub fn split_milestones(
    today: Vec<TenureAnniversary>,
    milestone_years: &[i64],
) -> (Vec<TenureAnniversary>, Vec<TenureAnniversary>) {
    today
        .into_iter()
        .partition(|entry| milestone_years.contains(&entry.years_of_service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmploymentInterval;

    fn policy() -> PolicyConfig {
        PolicyConfig {
            terminated_status_code: 7,
            person_id_width: 11,
            rehire_gap_threshold_days: 180,
            minimum_service_years: 1,
            milestone_years: vec![5, 10, 15, 20, 25, 30],
            monthly_report_day: 27,
            vacancy_label: "Manager position not occupied".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_record(person_id: &str, hired: NaiveDate, born: NaiveDate) -> EmployeeRecord {
        EmployeeRecord {
            person_id: person_id.to_string(),
            name: "Ana Souza".to_string(),
            status_code: 2,
            registration_number: None,
            personal_email: Some("ana@example.com".to_string()),
            corporate_email: Some("ana.souza@corp.example.com".to_string()),
            hire_date: hired,
            termination_date: None,
            birth_date: born,
            manager_name: Some("Carlos Lima".to_string()),
            manager_email: Some("carlos.lima@corp.example.com".to_string()),
            workplace_name: Some("Head Office".to_string()),
            manager_status_code: 2,
        }
    }

    fn consolidated(
        person_id: &str,
        first_hire: NaiveDate,
        years: i64,
        gap: Option<i64>,
    ) -> ConsolidatedTenure {
        ConsolidatedTenure {
            person_id: person_id.to_string(),
            name: "Ana Souza".to_string(),
            first_hire_date: first_hire,
            intervals: vec![EmploymentInterval {
                start: first_hire,
                end: first_hire,
            }],
            total_days_employed: years * 365,
            years_of_service: years,
            shortest_gap_days: gap,
        }
    }

    // ==========================================================================
    // AS-001: next month wraps at year end
    // ==========================================================================
    #[test]
    fn test_as_001_next_month_wraps_december() {
        assert_eq!(next_month(date(2024, 12, 31)), 1);
        assert_eq!(next_month(date(2024, 1, 15)), 2);
    }

    // ==========================================================================
    // AS-002: tenure next-month selection filters by month and minimum years
    // ==========================================================================
    #[test]
    fn test_as_002_tenure_next_month() {
        let reference = date(2024, 2, 15);
        let records = vec![
            valid_record("00000000001", date(2015, 3, 10), date(1990, 6, 15)),
            // Hired in March of the reference year: under one year of service.
            valid_record("00000000002", date(2023, 3, 20), date(1988, 1, 2)),
            valid_record("00000000003", date(2019, 7, 1), date(1992, 9, 9)),
        ];

        let selected = tenure_next_month(&records, reference, &policy());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].record.person_id, "00000000001");
        assert_eq!(selected[0].years_of_service, 8);
    }

    #[test]
    fn test_tenure_next_month_sorted_by_month_day() {
        let reference = date(2024, 2, 15);
        let records = vec![
            valid_record("00000000001", date(2015, 3, 22), date(1990, 6, 15)),
            valid_record("00000000002", date(2010, 3, 5), date(1988, 1, 2)),
        ];

        let selected = tenure_next_month(&records, reference, &policy());
        let days: Vec<u32> = selected.iter().map(|e| e.record.hire_date.day()).collect();
        assert_eq!(days, vec![5, 22]);
    }

    // ==========================================================================
    // AS-003: tenure today matches day and month, not year
    // ==========================================================================
    #[test]
    fn test_as_003_tenure_today() {
        let reference = date(2024, 3, 10);
        let records = vec![
            valid_record("00000000001", date(2015, 3, 10), date(1990, 6, 15)),
            valid_record("00000000002", date(2015, 3, 11), date(1988, 1, 2)),
        ];

        let selected = tenure_today(&records, reference, &policy());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].record.person_id, "00000000001");
        assert_eq!(selected[0].years_of_service, 9);
    }

    #[test]
    fn test_tenure_today_excludes_first_year() {
        let reference = date(2024, 3, 10);
        let records = vec![valid_record(
            "00000000001",
            date(2023, 3, 10),
            date(1990, 6, 15),
        )];
        // Exactly one 365-day year has passed; 2024 is a leap year so the
        // elapsed days are 366 and the person celebrates year one.
        let selected = tenure_today(&records, reference, &policy());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].years_of_service, 1);

        let hired_months_ago = vec![valid_record(
            "00000000002",
            date(2024, 1, 10),
            date(1990, 6, 15),
        )];
        assert!(tenure_today(&hired_months_ago, date(2024, 2, 10), &policy()).is_empty());
    }

    // ==========================================================================
    // AS-004: rehired selection splits by the gap threshold
    // ==========================================================================
    #[test]
    fn test_as_004_rehired_next_month_split() {
        let reference = date(2024, 2, 15);
        let tenures = vec![
            consolidated("00000000001", date(2015, 3, 1), 8, Some(91)),
            consolidated("00000000002", date(2012, 3, 5), 10, Some(400)),
            // April anniversary: not selected in March.
            consolidated("00000000003", date(2016, 4, 1), 7, Some(10)),
        ];

        let selection = rehired_next_month(&tenures, reference, &policy());
        assert_eq!(selection.short_gap.len(), 1);
        assert_eq!(selection.short_gap[0].person_id, "00000000001");
        assert_eq!(selection.long_gap.len(), 1);
        assert_eq!(selection.long_gap[0].person_id, "00000000002");
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_rehired_below_one_year_excluded() {
        let reference = date(2024, 2, 15);
        let tenures = vec![consolidated("00000000001", date(2023, 3, 1), 0, Some(30))];
        assert!(rehired_next_month(&tenures, reference, &policy()).is_empty());
    }

    // ==========================================================================
    // AS-005: born 1990-06-15, reference 2024-05-20
    // => next-month selection (June), not today
    // ==========================================================================
    #[test]
    fn test_as_005_birthday_scenario() {
        let reference = date(2024, 5, 20);
        let records = vec![valid_record(
            "00000000001",
            date(2020, 1, 1),
            date(1990, 6, 15),
        )];

        let upcoming = birthdays_next_month(&records, reference);
        assert_eq!(upcoming.len(), 1);
        assert!(birthdays_today(&records, reference).is_empty());
    }

    #[test]
    fn test_birthday_today_ignores_year() {
        let reference = date(2024, 6, 15);
        let records = vec![valid_record(
            "00000000001",
            date(2020, 1, 1),
            date(1990, 6, 15),
        )];
        assert_eq!(birthdays_today(&records, reference).len(), 1);
    }

    #[test]
    fn test_birthdays_have_no_tenure_requirement() {
        // Hired two weeks ago, birthday next month: still selected.
        let reference = date(2024, 5, 20);
        let records = vec![valid_record(
            "00000000001",
            date(2024, 5, 6),
            date(1995, 6, 2),
        )];
        assert_eq!(birthdays_next_month(&records, reference).len(), 1);
    }

    #[test]
    fn test_birthdays_next_month_sorted_by_day() {
        let reference = date(2024, 5, 20);
        let records = vec![
            valid_record("00000000001", date(2020, 1, 1), date(1990, 6, 25)),
            valid_record("00000000002", date(2020, 1, 1), date(1985, 6, 3)),
        ];
        let upcoming = birthdays_next_month(&records, reference);
        let days: Vec<u32> = upcoming.iter().map(|r| r.birth_date.day()).collect();
        assert_eq!(days, vec![3, 25]);
    }

    // ==========================================================================
    // AS-006: milestone split
    // ==========================================================================
    #[test]
    fn test_as_006_milestone_split() {
        let reference = date(2024, 3, 10);
        let records = vec![
            valid_record("00000000001", date(2019, 3, 10), date(1990, 6, 15)),
            valid_record("00000000002", date(2021, 3, 10), date(1988, 1, 2)),
        ];
        let today = tenure_today(&records, reference, &policy());
        assert_eq!(today.len(), 2);

        let (star, regular) = split_milestones(today, &policy().milestone_years);
        assert_eq!(star.len(), 1);
        assert_eq!(star[0].record.person_id, "00000000001");
        assert_eq!(star[0].years_of_service, 5);
        assert_eq!(regular.len(), 1);
    }

    // ==========================================================================
    // AS-007: today is a subset of next-month run one month earlier
    // ==========================================================================
    #[test]
    fn test_as_007_today_subset_of_prior_next_month() {
        let records = vec![
            valid_record("00000000001", date(2015, 3, 10), date(1990, 6, 15)),
            valid_record("00000000002", date(2018, 3, 25), date(1988, 1, 2)),
            valid_record("00000000003", date(2019, 7, 1), date(1992, 9, 9)),
        ];

        let upcoming = tenure_next_month(&records, date(2024, 2, 10), &policy());
        let today = tenure_today(&records, date(2024, 3, 10), &policy());

        let upcoming_ids: Vec<&str> = upcoming
            .iter()
            .map(|e| e.record.person_id.as_str())
            .collect();
        for entry in &today {
            assert!(upcoming_ids.contains(&entry.record.person_id.as_str()));
        }
    }

    #[test]
    fn test_selections_do_not_mutate_input() {
        let records = vec![valid_record(
            "00000000001",
            date(2015, 3, 10),
            date(1990, 6, 15),
        )];
        let before = records.clone();
        let _ = tenure_next_month(&records, date(2024, 2, 15), &policy());
        let _ = birthdays_next_month(&records, date(2024, 5, 20));
        assert_eq!(records, before);
    }

    #[test]
    fn test_years_between_floors() {
        // 363 days is still year zero; a full leap year is 365 elapsed
        // days and crosses into year one.
        assert_eq!(years_between(date(2019, 1, 2), date(2019, 12, 31)), 0);
        assert_eq!(years_between(date(2020, 1, 1), date(2020, 12, 31)), 1);
        assert_eq!(years_between(date(2015, 3, 1), date(2024, 2, 15)), 8);
    }
}
