//! Batch run orchestration.
//!
//! One call to [`run_batch`] is one complete pass: fetch the snapshot,
//! normalize, classify, reconcile rehired timelines, select the upcoming
//! and same-day anniversaries against the reference date, compose the
//! messages and dispatch them. Every log line carries the run's batch id
//! so a day's runs can be told apart.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::notify::{Dispatcher, Mailer, compose_daily, compose_monthly};
use crate::processing::{
    birthdays_next_month, birthdays_today, classify, consolidate_all, next_month, normalize_rows,
    rehired_next_month, split_milestones, tenure_next_month, tenure_today,
};
use crate::source::SnapshotSource;

/// What a batch run did, for logs and callers.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Correlation id for this run.
    pub batch_id: Uuid,
    /// The date all selections were evaluated against.
    pub reference_date: NaiveDate,
    /// Rows the source delivered.
    pub rows_fetched: usize,
    /// Rows that normalized into usable records.
    pub records_normalized: usize,
    /// Rows rejected during normalization.
    pub rows_rejected: usize,
    /// People classified as valid for notifications.
    pub valid_people: usize,
    /// People routed to the rehired reconciliation path.
    pub rehired_people: usize,
    /// Whether the monthly rosters went out this run.
    pub monthly_sent: bool,
    /// Messages successfully dispatched.
    pub messages_sent: usize,
    /// Subjects of messages that failed to dispatch.
    pub dispatch_failures: Vec<String>,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u128,
}

/// Runs one complete notification batch.
///
/// `reference` overrides the evaluation date; `None` uses today (UTC).
/// A snapshot fetch failure aborts the run. An empty snapshot is not an
/// error: the run logs it and finishes having sent nothing.
pub fn run_batch<S, M>(
    source: &mut S,
    dispatcher: &Dispatcher<M>,
    config: &EngineConfig,
    reference: Option<NaiveDate>,
) -> EngineResult<BatchSummary>
where
    S: SnapshotSource,
    M: Mailer,
{
    let started = Instant::now();
    let batch_id = Uuid::new_v4();
    let reference = reference.unwrap_or_else(|| Utc::now().date_naive());
    info!(%batch_id, %reference, "batch run starting");

    let rows = source.fetch_snapshot()?;
    if rows.is_empty() {
        warn!(%batch_id, "snapshot is empty, nothing to do");
        return Ok(BatchSummary {
            batch_id,
            reference_date: reference,
            rows_fetched: 0,
            records_normalized: 0,
            rows_rejected: 0,
            valid_people: 0,
            rehired_people: 0,
            monthly_sent: false,
            messages_sent: 0,
            dispatch_failures: Vec::new(),
            duration_ms: started.elapsed().as_millis(),
        });
    }

    let snapshot = normalize_rows(&rows, config.policy());
    let records_normalized = snapshot.records.len();
    let rows_rejected = snapshot.rejected.len();
    let partitions = classify(snapshot.records, config);
    info!(
        %batch_id,
        valid = partitions.valid.len(),
        rehired = partitions.rehired.len(),
        terminated = partitions.terminated_all.len(),
        missing_email = partitions.missing_personal_email.len(),
        missing_manager = partitions.missing_valid_manager.len(),
        excluded = partitions.excluded,
        "population classified"
    );

    let policy = config.policy();
    let mut messages = Vec::new();

    let monthly_due = dispatcher.monthly_reports_due(reference, policy.monthly_report_day);
    if monthly_due {
        let consolidated = consolidate_all(&partitions.rehired, reference);
        let tenure = tenure_next_month(&partitions.valid, reference, policy);
        let rehired = rehired_next_month(&consolidated, reference, policy);
        let birthdays = birthdays_next_month(&partitions.valid, reference);
        info!(
            %batch_id,
            month = next_month(reference),
            tenure = tenure.len(),
            rehired = rehired.len(),
            birthdays = birthdays.len(),
            "monthly selections made"
        );
        messages.extend(compose_monthly(
            next_month(reference),
            &tenure,
            &rehired,
            &birthdays,
            config.recipients(),
        ));
    } else {
        info!(%batch_id, day = policy.monthly_report_day, "monthly rosters not due today");
    }

    let today = tenure_today(&partitions.valid, reference, policy);
    let (star, regular) = split_milestones(today, &policy.milestone_years);
    let birthdays = birthdays_today(&partitions.valid, reference);
    info!(
        %batch_id,
        milestone = star.len(),
        regular = regular.len(),
        birthdays = birthdays.len(),
        "daily selections made"
    );
    messages.extend(compose_daily(&star, &regular, &birthdays));

    let report = dispatcher.dispatch(&messages);
    let summary = BatchSummary {
        batch_id,
        reference_date: reference,
        rows_fetched: rows.len(),
        records_normalized,
        rows_rejected,
        valid_people: partitions.valid.len(),
        rehired_people: partitions.rehired.len(),
        monthly_sent: monthly_due,
        messages_sent: report.sent,
        dispatch_failures: report.failures,
        duration_ms: started.elapsed().as_millis(),
    };
    info!(
        %batch_id,
        sent = summary.messages_sent,
        failed = summary.dispatch_failures.len(),
        duration_ms = summary.duration_ms as u64,
        "batch run finished"
    );
    Ok(summary)
}
