//! Addressed, ready-to-send email content.

use serde::{Deserialize, Serialize};

/// A fully composed email, ready for a mailer.
///
/// Composition produces these; the dispatch boundary consumes them. The
/// body is self-contained HTML with no external references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// All destination addresses for this message.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Complete HTML body.
    pub html_body: String,
}

impl EmailMessage {
    /// Builds a message, dropping blank recipient addresses.
    pub fn new(recipients: Vec<String>, subject: String, html_body: String) -> Self {
        let recipients = recipients
            .into_iter()
            .filter(|address| !address.trim().is_empty())
            .collect();
        Self {
            recipients,
            subject,
            html_body,
        }
    }

    /// True when the message has at least one recipient.
    pub fn is_deliverable(&self) -> bool {
        !self.recipients.is_empty()
    }
}
