//! The delivery boundary.
//!
//! The engine hands [`EmailMessage`] values to a [`Mailer`]; everything
//! behind that trait (SMTP, an API client, a capture buffer in tests) is
//! somebody else's problem. The [`Dispatcher`] wraps a mailer with the
//! environment policy: test runs redirect every message to a sandbox
//! address so a dry run can never reach real people.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::notify::message::EmailMessage;

/// Where a run's messages are allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Real recipients, monthly reports gated to the configured day.
    Production,
    /// Every message is redirected to the sandbox recipient and the
    /// monthly-report day gate is bypassed.
    Test,
}

/// Sends one composed message. Implementations own connection handling
/// and retries; the engine only cares whether the message left.
pub trait Mailer {
    /// Delivers the message, or reports why it could not be sent.
    fn send(&self, message: &EmailMessage) -> EngineResult<()>;
}

/// Outcome of a dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages successfully handed to the mailer.
    pub sent: usize,
    /// Subjects of messages the mailer rejected.
    pub failures: Vec<String>,
}

/// Drives a [`Mailer`] under an [`Environment`] policy.
#[derive(Debug)]
pub struct Dispatcher<M: Mailer> {
    mailer: M,
    environment: Environment,
    test_recipient: String,
}

impl<M: Mailer> Dispatcher<M> {
    /// Wraps a mailer with the environment policy. `test_recipient` is
    /// the sandbox address used when the environment is [`Environment::Test`].
    pub fn new(mailer: M, environment: Environment, test_recipient: String) -> Self {
        Self {
            mailer,
            environment,
            test_recipient,
        }
    }

    /// The environment this dispatcher runs under.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Whether monthly rosters should go out on this reference date.
    ///
    /// Production sends them only on the configured day of the month;
    /// test runs always send so a rehearsal exercises the full path.
    pub fn monthly_reports_due(&self, reference: NaiveDate, report_day: u32) -> bool {
        match self.environment {
            Environment::Production => reference.day() == report_day,
            Environment::Test => true,
        }
    }

    /// Sends every deliverable message, collecting failures instead of
    /// aborting: one bad address must not hold up the rest of the batch.
    pub fn dispatch(&self, messages: &[EmailMessage]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for message in messages {
            let message = self.apply_environment(message);
            if !message.is_deliverable() {
                warn!(subject = %message.subject, "message has no recipients, skipped");
                continue;
            }
            match self.mailer.send(&message) {
                Ok(()) => {
                    info!(
                        subject = %message.subject,
                        recipients = message.recipients.len(),
                        "message sent"
                    );
                    report.sent += 1;
                }
                Err(error) => {
                    warn!(subject = %message.subject, %error, "message failed to send");
                    report.failures.push(message.subject.clone());
                }
            }
        }
        report
    }

    fn apply_environment(&self, message: &EmailMessage) -> EmailMessage {
        match self.environment {
            Environment::Production => message.clone(),
            Environment::Test => EmailMessage::new(
                vec![self.test_recipient.clone()],
                message.subject.clone(),
                message.html_body.clone(),
            ),
        }
    }
}

/// A mailer that rejects everything, for drills and dry runs where even
/// the sandbox must stay quiet.
#[derive(Debug, Default)]
pub struct NullMailer;

impl Mailer for NullMailer {
    fn send(&self, message: &EmailMessage) -> EngineResult<()> {
        Err(EngineError::Dispatch {
            subject: message.subject.clone(),
            message: "null mailer drops all messages".to_string(),
        })
    }
}
