//! Business logic services for storefront.
//!
//! # Services
//!
//! - `handoff` - Delivery channels for submitted quick orders (clipboard,
//!   email compose link, log)

pub mod handoff;

pub use handoff::{ClipboardBackend, ClipboardSink, Handoff, LogSink, MailtoSink, SystemClipboard};
