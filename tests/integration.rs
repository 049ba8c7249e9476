//! End-to-end batch runs against an in-memory snapshot and a capturing
//! mailer: snapshot in, addressed messages out.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use anniversary_engine::batch::run_batch;
use anniversary_engine::config::{
    EngineConfig, ExclusionsConfig, PolicyConfig, RecipientsConfig,
};
use anniversary_engine::error::EngineResult;
use anniversary_engine::models::RawEmployeeRow;
use anniversary_engine::notify::{Dispatcher, EmailMessage, Environment, Mailer};
use anniversary_engine::source::FixedSnapshot;

/// Captures every message handed to it so assertions can inspect
/// recipients and subjects after the run.
#[derive(Clone, Default)]
struct CapturingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl Mailer for CapturingMailer {
    fn send(&self, message: &EmailMessage) -> EngineResult<()> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.clone());
        Ok(())
    }
}

impl CapturingMailer {
    fn messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn config(monthly_report_day: u32) -> EngineConfig {
    EngineConfig::new(
        PolicyConfig {
            terminated_status_code: 7,
            person_id_width: 11,
            rehire_gap_threshold_days: 180,
            minimum_service_years: 1,
            milestone_years: vec![5, 10, 15, 20, 25, 30],
            monthly_report_day,
            vacancy_label: "Manager position not occupied".to_string(),
        },
        RecipientsConfig {
            hr: "internal.comms@example.com".to_string(),
            rehire_review: "people.review@example.com".to_string(),
            test: "hr.sandbox@example.com".to_string(),
        },
        ExclusionsConfig {
            employee_name_contains: vec!["Quaritch".to_string()],
            manager_name_contains: vec![],
        },
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A fully populated active row; tests override the fields they exercise.
fn active_row(tax_id: &str, name: &str, hired: &str, born: &str) -> RawEmployeeRow {
    RawEmployeeRow {
        tax_id: Some(tax_id.to_string()),
        name: Some(name.to_string()),
        status_code: Some("2".to_string()),
        registration_number: Some("1001".to_string()),
        personal_email: Some(format!("{}@example.com", tax_id)),
        corporate_email: Some(format!("{}@corp.example.com", tax_id)),
        hire_date: Some(hired.to_string()),
        termination_date: Some("1900-12-31".to_string()),
        birth_date: Some(born.to_string()),
        manager_name: Some("CARLOS LIMA".to_string()),
        manager_email: Some("carlos.lima@corp.example.com".to_string()),
        workplace_name: Some("Head Office".to_string()),
        manager_status_code: Some("2".to_string()),
    }
}

fn run(
    rows: Vec<RawEmployeeRow>,
    environment: Environment,
    config: &EngineConfig,
    reference: NaiveDate,
) -> (anniversary_engine::batch::BatchSummary, Vec<EmailMessage>) {
    let mailer = CapturingMailer::default();
    let dispatcher = Dispatcher::new(
        mailer.clone(),
        environment,
        config.recipients().test.clone(),
    );
    let mut source = FixedSnapshot::new(rows);
    let summary = run_batch(&mut source, &dispatcher, config, Some(reference)).unwrap();
    (summary, mailer.messages())
}

// ==============================================================================
// IT-001: monthly run on the report day produces rosters for the next month
// ==============================================================================
#[test]
fn test_it_001_monthly_rosters_on_report_day() {
    let config = config(27);
    let rows = vec![
        // March 2015 hire: tenure anniversary next month.
        active_row("11122233344", "ANA SOUZA", "2015-03-10", "1990-06-15"),
        // March birthday.
        active_row("22233344455", "BRUNO DIAS", "2019-07-01", "1988-03-05"),
        // Nothing in March.
        active_row("33344455566", "CLARA NUNES", "2018-09-09", "1992-11-11"),
    ];
    let (summary, messages) = run(rows, Environment::Production, &config, date(2024, 2, 27));

    assert!(summary.monthly_sent);
    assert_eq!(summary.valid_people, 3);

    let subjects: Vec<&str> = messages.iter().map(|m| m.subject.as_str()).collect();
    assert!(subjects.contains(&"Work anniversaries in March"));
    assert!(subjects.contains(&"Your team's work anniversaries in March"));
    assert!(subjects.contains(&"Birthdays in March"));
    assert!(subjects.contains(&"Your team's birthdays in March"));

    let hr_roster = messages
        .iter()
        .find(|m| m.subject == "Work anniversaries in March")
        .unwrap();
    assert_eq!(hr_roster.recipients, vec!["internal.comms@example.com"]);
    assert!(hr_roster.html_body.contains("Ana Souza"));
    assert!(!hr_roster.html_body.contains("Clara Nunes"));
}

// ==============================================================================
// IT-002: off the report day, production sends only same-day notifications
// ==============================================================================
#[test]
fn test_it_002_monthly_gated_off_report_day() {
    let config = config(27);
    let rows = vec![active_row(
        "11122233344",
        "ANA SOUZA",
        "2015-03-10",
        "1990-06-15",
    )];
    let (summary, messages) = run(rows, Environment::Production, &config, date(2024, 2, 15));

    assert!(!summary.monthly_sent);
    assert!(messages.is_empty());
}

// ==============================================================================
// IT-003: same-day anniversary fans out greeting plus manager digest
// ==============================================================================
#[test]
fn test_it_003_daily_greeting_and_digest() {
    let config = config(27);
    let rows = vec![
        // Hired 2019-03-10: reference 2024-03-10 is the five-year milestone.
        active_row("11122233344", "ANA SOUZA", "2019-03-10", "1990-06-15"),
        // Birthday today.
        active_row("22233344455", "BRUNO DIAS", "2018-09-09", "1988-03-10"),
    ];
    let (summary, messages) = run(rows, Environment::Production, &config, date(2024, 3, 10));

    assert_eq!(summary.messages_sent, 4);
    let subjects: Vec<&str> = messages.iter().map(|m| m.subject.as_str()).collect();
    assert!(subjects.contains(&"Congratulations on 5 years with us!"));
    assert!(subjects.contains(&"Work anniversaries on your team today"));
    assert!(subjects.contains(&"Happy birthday!"));
    assert!(subjects.contains(&"Birthdays on your team today"));

    let greeting = messages
        .iter()
        .find(|m| m.subject.starts_with("Congratulations"))
        .unwrap();
    assert_eq!(
        greeting.recipients,
        vec![
            "11122233344@corp.example.com".to_string(),
            "11122233344@example.com".to_string(),
        ]
    );
}

// ==============================================================================
// IT-004: rehired person is reconciled and reported for review
// ==============================================================================
#[test]
fn test_it_004_rehired_consolidation() {
    let config = config(27);
    let mut first_stint = active_row("11122233344", "ANA SOUZA", "2015-03-01", "1990-06-15");
    first_stint.termination_date = Some("2020-01-01".to_string());
    first_stint.status_code = Some("7".to_string());
    let second_stint = active_row("11122233344", "ANA SOUZA", "2020-04-01", "1990-06-15");

    let (summary, messages) = run(
        vec![first_stint, second_stint],
        Environment::Production,
        &config,
        date(2024, 2, 27),
    );

    assert_eq!(summary.rehired_people, 1);
    assert_eq!(summary.valid_people, 0);

    let review = messages
        .iter()
        .find(|m| m.subject.contains("review needed"))
        .unwrap();
    assert_eq!(review.recipients, vec!["people.review@example.com"]);
    assert!(review.html_body.contains("Ana Souza"));
    assert!(review.html_body.contains("2015-03-01"));
    // The 91-day gap puts this return inside the review window; eight
    // whole years were actually worked across the two stints.
    let window_section = review.html_body.split("longer absence").next().unwrap();
    assert!(window_section.contains("<td>8</td>"));
}

// ==============================================================================
// IT-005: terminated-everywhere and email-less people send nothing
// ==============================================================================
#[test]
fn test_it_005_non_valid_categories_silent() {
    let config = config(27);
    let mut terminated = active_row("11122233344", "ANA SOUZA", "2015-03-10", "1990-03-15");
    terminated.status_code = Some("7".to_string());
    terminated.termination_date = Some("2023-06-30".to_string());
    let mut no_email = active_row("22233344455", "BRUNO DIAS", "2016-03-20", "1988-03-05");
    no_email.personal_email = None;

    let (summary, messages) = run(
        vec![terminated, no_email],
        Environment::Production,
        &config,
        date(2024, 2, 27),
    );

    assert_eq!(summary.valid_people, 0);
    assert!(messages.is_empty());
}

// ==============================================================================
// IT-006: denylisted names never appear in any message
// ==============================================================================
#[test]
fn test_it_006_denylist_suppression() {
    let config = config(27);
    let rows = vec![
        active_row("11122233344", "MILES QUARITCH", "2015-03-10", "1990-03-15"),
        active_row("22233344455", "ANA SOUZA", "2016-03-20", "1988-03-05"),
    ];
    let (_, messages) = run(rows, Environment::Production, &config, date(2024, 2, 27));

    assert!(!messages.is_empty());
    for message in &messages {
        assert!(!message.html_body.contains("Quaritch"));
    }
}

// ==============================================================================
// IT-007: test environment redirects everything and ignores the day gate
// ==============================================================================
#[test]
fn test_it_007_test_environment() {
    let config = config(27);
    let rows = vec![active_row(
        "11122233344",
        "ANA SOUZA",
        "2015-03-10",
        "1990-06-15",
    )];
    // The 15th is not the report day, yet the monthly roster still runs.
    let (summary, messages) = run(rows, Environment::Test, &config, date(2024, 2, 15));

    assert!(summary.monthly_sent);
    assert!(!messages.is_empty());
    for message in &messages {
        assert_eq!(message.recipients, vec!["hr.sandbox@example.com"]);
    }
}

// ==============================================================================
// IT-008: malformed rows are rejected without failing the batch
// ==============================================================================
#[test]
fn test_it_008_rejected_rows_do_not_abort() {
    let config = config(27);
    let mut bad_date = active_row("11122233344", "ANA SOUZA", "10/03/2015", "1990-06-15");
    bad_date.hire_date = Some("10/03/2015".to_string());
    let good = active_row("22233344455", "BRUNO DIAS", "2016-03-20", "1988-03-05");

    let (summary, _) = run(
        vec![bad_date, good],
        Environment::Production,
        &config,
        date(2024, 2, 27),
    );

    assert_eq!(summary.rows_fetched, 2);
    assert_eq!(summary.rows_rejected, 1);
    assert_eq!(summary.records_normalized, 1);
    assert_eq!(summary.valid_people, 1);
}

// ==============================================================================
// IT-009: an empty snapshot finishes cleanly with nothing sent
// ==============================================================================
#[test]
fn test_it_009_empty_snapshot() {
    let config = config(27);
    let (summary, messages) = run(vec![], Environment::Production, &config, date(2024, 2, 27));

    assert_eq!(summary.rows_fetched, 0);
    assert_eq!(summary.messages_sent, 0);
    assert!(messages.is_empty());
}

// ==============================================================================
// IT-010: a failing source aborts the run
// ==============================================================================
#[test]
fn test_it_010_fetch_failure_is_fatal() {
    use anniversary_engine::error::EngineError;
    use anniversary_engine::notify::NullMailer;
    use anniversary_engine::source::SnapshotSource;

    struct BrokenSource;
    impl SnapshotSource for BrokenSource {
        fn fetch_snapshot(&mut self) -> EngineResult<Vec<RawEmployeeRow>> {
            Err(EngineError::SnapshotFetch {
                message: "connection refused".to_string(),
            })
        }
    }

    let config = config(27);
    let dispatcher = Dispatcher::new(
        NullMailer,
        Environment::Production,
        config.recipients().test.clone(),
    );
    let result = run_batch(&mut BrokenSource, &dispatcher, &config, Some(date(2024, 2, 27)));
    assert!(matches!(result, Err(EngineError::SnapshotFetch { .. })));
}
