//! Quick-order workflow.
//!
//! An [`OrderSheet`] owns at most one [`OrderDraft`] for the selected product.
//! Submitting turns the draft into a [`Payload`] and hands it to exactly one
//! [`HandoffSink`]; delivery failures are reported as a [`Notice`] and leave
//! the draft open.
//!
//! ```text
//! Closed --open--> Open --submit--> Submitting --ok--> Closed
//!                   ^                    |
//!                   +------failure-------+
//!
//! close/open from any state discards the draft; a late handoff result
//! for a discarded submit is ignored.
//! ```

pub mod draft;
pub mod handoff;
pub mod mailto;
pub mod payload;
pub mod sheet;

pub use draft::{DraftField, DraftFieldError, OrderDraft};
pub use handoff::{Delivery, HandoffError, HandoffSink, Notice, NoticeLevel};
pub use mailto::MailtoLink;
pub use payload::Payload;
pub use sheet::{
    OrderSheet, PendingSubmit, SUBMIT_STALE_AFTER_SECS, SheetError, SubmitOutcome, Submission,
};
