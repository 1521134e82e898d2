//! Mail-compose collaborator and `mailto:` URL construction.
//!
//! Exporting a report ends with a pre-filled outgoing-message draft. Nothing
//! here attaches the report artifact; the user attaches it manually.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Fixed subject line for the export mail.
pub const MAIL_SUBJECT: &str = "Körjournal";

/// Fixed body template for the export mail, CRLF line breaks.
pub const MAIL_BODY: &str = "Hej,\r\nHär kommer min körjournal.\r\nRapport bifogad.";

/// Opens a pre-filled outgoing-message draft.
pub trait MessageComposer {
    /// Composes a draft with the given subject and body.
    fn compose(&mut self, subject: &str, body: &str);
}

/// Builds a `mailto:` URL with percent-encoded subject and body and no
/// recipient, so the user picks one in their mail client.
pub fn mailto_url(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(subject, NON_ALPHANUMERIC),
        utf8_percent_encode(body, NON_ALPHANUMERIC),
    )
}

/// [`MessageComposer`] that builds a `mailto:` URL and keeps it for the
/// embedding shell to open.
#[derive(Debug, Default)]
pub struct MailtoComposer {
    last_url: Option<String>,
}

impl MailtoComposer {
    /// Composer with no draft yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently composed URL, if any.
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }
}

impl MessageComposer for MailtoComposer {
    fn compose(&mut self, subject: &str, body: &str) {
        self.last_url = Some(mailto_url(subject, body));
    }
}
