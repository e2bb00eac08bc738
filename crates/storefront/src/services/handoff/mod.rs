//! Quick-order handoff channels.
//!
//! Each channel implements [`HandoffSink`]. [`Handoff`] picks one of them from
//! configuration so the rest of the storefront only ever sees a single sink.

mod clipboard;
mod email;
mod log;

use std::sync::Arc;

use sole_gifts_core::{Delivery, HandoffError, HandoffSink, Payload};

pub use clipboard::{ClipboardBackend, ClipboardSink, SystemClipboard};
pub use email::MailtoSink;
pub use log::LogSink;

use crate::config::{OrderChannel, OrderConfig};

/// The configured handoff channel.
#[derive(Clone)]
pub enum Handoff {
    Clipboard(ClipboardSink),
    Email(MailtoSink),
    Log(LogSink),
}

impl Handoff {
    /// Build the channel selected in `config`.
    ///
    /// The clipboard channel uses the host's system clipboard.
    #[must_use]
    pub fn from_config(config: &OrderConfig) -> Self {
        match config.channel {
            OrderChannel::Clipboard => Self::Clipboard(ClipboardSink::new(Arc::new(SystemClipboard))),
            OrderChannel::Email => Self::Email(MailtoSink::new(config.recipient.clone())),
            OrderChannel::Log => Self::Log(LogSink),
        }
    }

    /// Which channel this is.
    #[must_use]
    pub const fn channel(&self) -> OrderChannel {
        match self {
            Self::Clipboard(_) => OrderChannel::Clipboard,
            Self::Email(_) => OrderChannel::Email,
            Self::Log(_) => OrderChannel::Log,
        }
    }
}

impl HandoffSink for Handoff {
    async fn deliver(&self, payload: &Payload) -> Result<Delivery, HandoffError> {
        let result = match self {
            Self::Clipboard(sink) => sink.deliver(payload).await,
            Self::Email(sink) => sink.deliver(payload).await,
            Self::Log(sink) => sink.deliver(payload).await,
        };

        match &result {
            Ok(_) => tracing::info!(
                channel = %self.channel(),
                product_id = %payload.product_id,
                quantity = %payload.quantity,
                "Order handed off"
            ),
            Err(e) => tracing::warn!(
                channel = %self.channel(),
                product_id = %payload.product_id,
                error = %e,
                "Order handoff failed"
            ),
        }

        result
    }
}
