//! Pre-filled email compose links.

use core::fmt;

use crate::order::Payload;
use crate::types::Email;

/// A `mailto:` URI addressed to the order inbox.
///
/// Subject and body are percent-encoded; body lines are joined with CRLF as
/// RFC 6068 expects. The recipient is a validated [`Email`] and goes in
/// unencoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink(String);

impl MailtoLink {
    /// Build the compose link for `payload`.
    #[must_use]
    pub fn new(recipient: &Email, payload: &Payload) -> Self {
        let body = payload.lines().join("\r\n");
        Self(format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&payload.subject()),
            urlencoding::encode(&body),
        ))
    }

    /// The full URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MailtoLink> for String {
    fn from(link: MailtoLink) -> Self {
        link.0
    }
}
