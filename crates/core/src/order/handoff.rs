//! Handoff channel capability.
//!
//! A submitted [`Payload`] leaves the core through exactly one [`HandoffSink`].
//! Implementations live with the binaries (system clipboard, email compose,
//! log); tests substitute their own.

use core::future::Future;

use serde::Serialize;
use thiserror::Error;

use crate::order::{MailtoLink, Payload};

/// Errors reported by a handoff channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandoffError {
    /// Writing to the clipboard failed (permission denied, no display, ...).
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// The channel could not accept the payload.
    #[error("handoff channel unavailable: {0}")]
    Unavailable(String),
}

/// What a successful handoff produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Payload text is on the clipboard.
    Copied,
    /// The caller should open this compose link.
    Compose(MailtoLink),
    /// Payload was written to the log sink.
    Logged,
}

impl Delivery {
    /// User-facing confirmation.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let message = match self {
            Self::Copied => "Order details copied to the clipboard. The full order text is below.",
            Self::Compose(_) => "Your email app should open with the order filled in.",
            Self::Logged => "Order received. We'll confirm availability and timing shortly.",
        };
        Notice::info(message)
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissable message shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Failure notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Notice for a failed handoff; always asks for a manual copy.
    #[must_use]
    pub fn for_failure(err: &HandoffError) -> Self {
        match err {
            HandoffError::Clipboard(_) => {
                Self::error("Copy failed. Please select and copy the order details manually.")
            }
            HandoffError::Unavailable(_) => Self::error(
                "We couldn't send your order. Please copy the order details and email them to us.",
            ),
        }
    }

    /// Whether this is a failure notice.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// A channel that accepts a submitted payload.
pub trait HandoffSink: Send + Sync {
    /// Hand `payload` to the channel.
    ///
    /// # Errors
    ///
    /// Returns a [`HandoffError`] if the channel rejects the payload. Callers
    /// treat every error as recoverable.
    fn deliver(
        &self,
        payload: &Payload,
    ) -> impl Future<Output = Result<Delivery, HandoffError>> + Send;
}
