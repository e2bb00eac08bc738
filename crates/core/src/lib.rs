//! Sole Gifts Core - Catalog and quick-order types.
//!
//! This crate provides the domain types shared by the Sole Gifts components:
//! - `storefront` - Public catalog grid and quick-order sheet
//! - `cli` - Terminal catalog listing and order handoff
//!
//! # Architecture
//!
//! The core crate contains only types, pure logic, and traits - no I/O, no
//! HTTP, no clipboard access. Handoff channels are implemented by the binaries
//! against the [`order::HandoffSink`] trait.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for slugs, prices, emails, and quantities
//! - [`catalog`] - The static product catalog and tag filtering
//! - [`order`] - Order drafts, payloads, the order sheet state machine, and handoff

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod order;
pub mod types;

pub use catalog::{Accent, Catalog, CatalogError, Product, TagFilter};
pub use order::{
    Delivery, DraftField, DraftFieldError, HandoffError, HandoffSink, MailtoLink, Notice,
    NoticeLevel, OrderDraft, OrderSheet, Payload, PendingSubmit, SUBMIT_STALE_AFTER_SECS,
    SheetError, SubmitOutcome, Submission,
};
pub use types::*;
