//! The closed set of notification kinds and their rendering.
//!
//! Every email the engine can produce is one of these variants. Adding a
//! new communication means adding a variant here, so the compiler walks
//! every `match` site for us.

use chrono::Datelike;

use crate::models::{ConsolidatedTenure, EmployeeRecord, TenureAnniversary};
use crate::notify::template::{format_name, greeting_body, month_name, roster_body};

/// A rendered-on-demand notification.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Monthly roster of upcoming tenure anniversaries for the HR team.
    HrTenureRoster {
        /// 1-based month the roster covers.
        month: u32,
        /// Selected anniversaries, already sorted.
        entries: Vec<TenureAnniversary>,
    },
    /// Monthly roster of a manager's own reports with upcoming tenure
    /// anniversaries.
    ManagerTenureRoster {
        /// Manager the roster is addressed to.
        manager_name: String,
        /// 1-based month the roster covers.
        month: u32,
        /// The manager's reports in the selection.
        entries: Vec<TenureAnniversary>,
    },
    /// Monthly roster of rehired people for human review, split by how
    /// long they were away.
    RehireReviewRoster {
        /// 1-based month the roster covers.
        month: u32,
        /// Returned within the configured gap threshold.
        short_gap: Vec<ConsolidatedTenure>,
        /// Returned after a longer absence.
        long_gap: Vec<ConsolidatedTenure>,
    },
    /// Congratulations sent to the person on their anniversary day.
    TenureGreeting {
        /// The person's name as it appears in the snapshot.
        name: String,
        /// Whole years of service being celebrated.
        years: i64,
        /// True when the year count is one of the celebrated milestones.
        milestone: bool,
    },
    /// Same-day heads-up to a manager about reports celebrating today.
    ManagerDailyTenureDigest {
        /// Manager the digest is addressed to.
        manager_name: String,
        /// The manager's reports celebrating today.
        entries: Vec<TenureAnniversary>,
    },
    /// Monthly roster of upcoming birthdays for the HR team.
    HrBirthdayRoster {
        /// 1-based month the roster covers.
        month: u32,
        /// Selected people, sorted by day.
        entries: Vec<EmployeeRecord>,
    },
    /// Monthly roster of a manager's own reports with upcoming birthdays.
    ManagerBirthdayRoster {
        /// Manager the roster is addressed to.
        manager_name: String,
        /// 1-based month the roster covers.
        month: u32,
        /// The manager's reports in the selection.
        entries: Vec<EmployeeRecord>,
    },
    /// Congratulations sent to the person on their birthday.
    BirthdayGreeting {
        /// The person's name as it appears in the snapshot.
        name: String,
    },
    /// Same-day heads-up to a manager about reports with a birthday today.
    ManagerDailyBirthdayDigest {
        /// Manager the digest is addressed to.
        manager_name: String,
        /// The manager's reports with a birthday today.
        entries: Vec<EmployeeRecord>,
    },
}

const TENURE_COLUMNS: &[&str] = &["Name", "Anniversary", "Years", "Workplace"];
const BIRTHDAY_COLUMNS: &[&str] = &["Name", "Birthday", "Workplace"];
const REHIRE_COLUMNS: &[&str] = &["Name", "First hired", "Stints", "Years worked"];

fn tenure_rows(entries: &[TenureAnniversary]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            vec![
                format_name(&entry.record.name),
                format!(
                    "{:02}/{:02}",
                    entry.record.hire_date.day(),
                    entry.record.hire_date.month()
                ),
                entry.years_of_service.to_string(),
                entry.record.workplace_name.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn birthday_rows(entries: &[EmployeeRecord]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|record| {
            vec![
                format_name(&record.name),
                format!("{:02}/{:02}", record.birth_date.day(), record.birth_date.month()),
                record.workplace_name.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn rehire_rows(tenures: &[ConsolidatedTenure]) -> Vec<Vec<String>> {
    tenures
        .iter()
        .map(|tenure| {
            vec![
                format_name(&tenure.name),
                tenure.first_hire_date.format("%Y-%m-%d").to_string(),
                tenure.intervals.len().to_string(),
                tenure.years_of_service.to_string(),
            ]
        })
        .collect()
}

impl Notification {
    /// Subject line for this notification.
    pub fn subject(&self) -> String {
        match self {
            Self::HrTenureRoster { month, .. } => {
                format!("Work anniversaries in {}", month_name(*month))
            }
            Self::ManagerTenureRoster { month, .. } => {
                format!("Your team's work anniversaries in {}", month_name(*month))
            }
            Self::RehireReviewRoster { month, .. } => {
                format!("Rehired anniversaries in {} - review needed", month_name(*month))
            }
            Self::TenureGreeting { years, milestone, .. } => {
                if *milestone {
                    format!("Congratulations on {years} years with us!")
                } else {
                    format!("Happy {years}-year work anniversary!")
                }
            }
            Self::ManagerDailyTenureDigest { .. } => {
                "Work anniversaries on your team today".to_string()
            }
            Self::HrBirthdayRoster { month, .. } => {
                format!("Birthdays in {}", month_name(*month))
            }
            Self::ManagerBirthdayRoster { month, .. } => {
                format!("Your team's birthdays in {}", month_name(*month))
            }
            Self::BirthdayGreeting { .. } => "Happy birthday!".to_string(),
            Self::ManagerDailyBirthdayDigest { .. } => {
                "Birthdays on your team today".to_string()
            }
        }
    }

    /// Complete HTML body for this notification.
    pub fn html_body(&self) -> String {
        match self {
            Self::HrTenureRoster { month, entries } => roster_body(
                "Hello People Team,",
                &format!(
                    "These colleagues celebrate a work anniversary in {}:",
                    month_name(*month)
                ),
                TENURE_COLUMNS,
                &tenure_rows(entries),
            ),
            Self::ManagerTenureRoster {
                manager_name,
                month,
                entries,
            } => roster_body(
                &format!("Hello {},", format_name(manager_name)),
                &format!(
                    "These members of your team celebrate a work anniversary in {}:",
                    month_name(*month)
                ),
                TENURE_COLUMNS,
                &tenure_rows(entries),
            ),
            Self::RehireReviewRoster {
                month,
                short_gap,
                long_gap,
            } => {
                let mut body = roster_body(
                    "Hello People Team,",
                    &format!(
                        "These rehired colleagues have a consolidated anniversary in {}. \
                         Returned within the review window:",
                        month_name(*month)
                    ),
                    REHIRE_COLUMNS,
                    &rehire_rows(short_gap),
                );
                let long_section = format!(
                    "<p>Returned after a longer absence:</p>{}",
                    crate::notify::template::html_table(REHIRE_COLUMNS, &rehire_rows(long_gap)),
                );
                // Splice the second table in before the signoff paragraph.
                match body.rfind("<p>Best regards") {
                    Some(pos) => body.insert_str(pos, &long_section),
                    None => body.push_str(&long_section),
                }
                body
            }
            Self::TenureGreeting { name, years, milestone } => {
                let message = if *milestone {
                    format!(
                        "Today marks {years} years since you joined us. \
                         Thank you for this remarkable journey!"
                    )
                } else {
                    format!(
                        "Today marks {years} {} since you joined us. \
                         Thank you for everything you do!",
                        if *years == 1 { "year" } else { "years" }
                    )
                };
                greeting_body(&format!("Dear {},", format_name(name)), &message)
            }
            Self::ManagerDailyTenureDigest { manager_name, entries } => roster_body(
                &format!("Hello {},", format_name(manager_name)),
                "These members of your team celebrate a work anniversary today:",
                TENURE_COLUMNS,
                &tenure_rows(entries),
            ),
            Self::HrBirthdayRoster { month, entries } => roster_body(
                "Hello People Team,",
                &format!("These colleagues have a birthday in {}:", month_name(*month)),
                BIRTHDAY_COLUMNS,
                &birthday_rows(entries),
            ),
            Self::ManagerBirthdayRoster {
                manager_name,
                month,
                entries,
            } => roster_body(
                &format!("Hello {},", format_name(manager_name)),
                &format!(
                    "These members of your team have a birthday in {}:",
                    month_name(*month)
                ),
                BIRTHDAY_COLUMNS,
                &birthday_rows(entries),
            ),
            Self::BirthdayGreeting { name } => greeting_body(
                &format!("Dear {},", format_name(name)),
                "We wish you a wonderful birthday. Have a great celebration!",
            ),
            Self::ManagerDailyBirthdayDigest { manager_name, entries } => roster_body(
                &format!("Hello {},", format_name(manager_name)),
                "These members of your team have a birthday today:",
                BIRTHDAY_COLUMNS,
                &birthday_rows(entries),
            ),
        }
    }
}
