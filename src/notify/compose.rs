//! Turns anniversary selections into addressed email messages.
//!
//! Composition is pure fan-out: it never sends anything, it only pairs a
//! [`Notification`] with its recipients. Empty selections compose to no
//! messages at all, so a quiet month produces a quiet run.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::RecipientsConfig;
use crate::models::{EmployeeRecord, RehiredSelection, TenureAnniversary};
use crate::notify::message::EmailMessage;
use crate::notify::notification::Notification;

fn render(notification: &Notification, recipients: Vec<String>) -> EmailMessage {
    EmailMessage::new(recipients, notification.subject(), notification.html_body())
}

/// Addresses a person gets congratulated at: corporate first, personal
/// as fallback. Classification guarantees at least the personal one.
fn person_addresses(record: &EmployeeRecord) -> Vec<String> {
    let mut addresses = Vec::new();
    if let Some(corporate) = &record.corporate_email {
        addresses.push(corporate.clone());
    }
    if let Some(personal) = &record.personal_email {
        addresses.push(personal.clone());
    }
    addresses
}

/// Groups records by manager, keyed on the manager's name with their
/// email alongside. Records whose manager has no deliverable address
/// (vacant positions included) are logged and left out.
fn by_manager<'a, T, F>(entries: &'a [T], record_of: F) -> BTreeMap<String, (String, Vec<&'a T>)>
where
    F: Fn(&'a T) -> &'a EmployeeRecord,
{
    let mut groups: BTreeMap<String, (String, Vec<&'a T>)> = BTreeMap::new();
    for entry in entries {
        let record = record_of(entry);
        let Some(manager_name) = record.manager_name.clone() else {
            continue;
        };
        match &record.manager_email {
            Some(email) if !email.trim().is_empty() => {
                groups
                    .entry(manager_name)
                    .or_insert_with(|| (email.clone(), Vec::new()))
                    .1
                    .push(entry);
            }
            _ => {
                warn!(
                    person_id = %record.person_id,
                    manager = %manager_name,
                    "manager has no email address, left out of manager notices"
                );
            }
        }
    }
    groups
}

/// Composes the monthly batch: HR rosters, per-manager rosters, and the
/// rehire review roster for the month after the reference date.
pub fn compose_monthly(
    month: u32,
    tenure: &[TenureAnniversary],
    rehired: &RehiredSelection,
    birthdays: &[EmployeeRecord],
    recipients: &RecipientsConfig,
) -> Vec<EmailMessage> {
    let mut messages = Vec::new();

    if !tenure.is_empty() {
        messages.push(render(
            &Notification::HrTenureRoster {
                month,
                entries: tenure.to_vec(),
            },
            vec![recipients.hr.clone()],
        ));
        for (manager_name, (email, entries)) in by_manager(tenure, |entry| &entry.record) {
            messages.push(render(
                &Notification::ManagerTenureRoster {
                    manager_name,
                    month,
                    entries: entries.into_iter().cloned().collect(),
                },
                vec![email],
            ));
        }
    }

    if !rehired.is_empty() {
        messages.push(render(
            &Notification::RehireReviewRoster {
                month,
                short_gap: rehired.short_gap.clone(),
                long_gap: rehired.long_gap.clone(),
            },
            vec![recipients.rehire_review.clone()],
        ));
    }

    if !birthdays.is_empty() {
        messages.push(render(
            &Notification::HrBirthdayRoster {
                month,
                entries: birthdays.to_vec(),
            },
            vec![recipients.hr.clone()],
        ));
        for (manager_name, (email, entries)) in by_manager(birthdays, |record| record) {
            messages.push(render(
                &Notification::ManagerBirthdayRoster {
                    manager_name,
                    month,
                    entries: entries.into_iter().cloned().collect(),
                },
                vec![email],
            ));
        }
    }

    messages
}

/// Composes the daily batch: personal greetings and same-day manager
/// digests for anniversaries falling on the reference date.
pub fn compose_daily(
    tenure_star: &[TenureAnniversary],
    tenure_regular: &[TenureAnniversary],
    birthdays: &[EmployeeRecord],
) -> Vec<EmailMessage> {
    let mut messages = Vec::new();

    for (entries, milestone) in [(tenure_star, true), (tenure_regular, false)] {
        for entry in entries {
            messages.push(render(
                &Notification::TenureGreeting {
                    name: entry.record.name.clone(),
                    years: entry.years_of_service,
                    milestone,
                },
                person_addresses(&entry.record),
            ));
        }
    }

    let tenure_all: Vec<TenureAnniversary> = tenure_star
        .iter()
        .chain(tenure_regular.iter())
        .cloned()
        .collect();
    for (manager_name, (email, entries)) in by_manager(&tenure_all, |entry| &entry.record) {
        messages.push(render(
            &Notification::ManagerDailyTenureDigest {
                manager_name,
                entries: entries.into_iter().cloned().collect(),
            },
            vec![email],
        ));
    }

    for record in birthdays {
        messages.push(render(
            &Notification::BirthdayGreeting {
                name: record.name.clone(),
            },
            person_addresses(record),
        ));
    }
    for (manager_name, (email, entries)) in by_manager(birthdays, |record| record) {
        messages.push(render(
            &Notification::ManagerDailyBirthdayDigest {
                manager_name,
                entries: entries.into_iter().cloned().collect(),
            },
            vec![email],
        ));
    }

    messages
}
