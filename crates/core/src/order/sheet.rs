//! Order sheet state machine.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Product;
use crate::order::{Delivery, DraftField, HandoffError, HandoffSink, Notice, OrderDraft, Payload};
use crate::types::CurrencyCode;

/// Seconds after which a `Submitting` sheet counts as abandoned.
///
/// Longer than any handoff timeout, so only a submit whose request was
/// dropped ever reaches it.
pub const SUBMIT_STALE_AFTER_SECS: i64 = 30;

/// Transition refused by the order sheet.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SheetError {
    /// No draft is open.
    #[error("no order is open")]
    NotOpen,

    /// A submit is already waiting on its handoff.
    #[error("order submission already in progress")]
    SubmitInProgress,
}

/// A submit waiting on its handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSubmit {
    pub ticket: Uuid,
    pub started_at: DateTime<Utc>,
    pub draft: OrderDraft,
}

/// Handle returned by [`OrderSheet::begin_submit`].
///
/// The ticket ties a handoff result back to the submit that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Uuid,
    pub payload: Payload,
}

/// Result of a submit that reached the handoff channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Channel accepted the payload.
    Delivered { delivery: Delivery, payload: Payload },
    /// Channel failed; the sheet is open again with the draft intact.
    Failed { notice: Notice, payload: Payload },
    /// Channel failed after the customer closed or replaced the sheet.
    /// The sheet was left as the customer set it.
    Cancelled { payload: Payload },
}

impl SubmitOutcome {
    /// Notice to show the customer.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Delivered { delivery, .. } => delivery.notice(),
            Self::Failed { notice, .. } => notice.clone(),
            Self::Cancelled { .. } => Notice::info("Order cancelled."),
        }
    }

    /// The payload that was handed off.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        match self {
            Self::Delivered { payload, .. }
            | Self::Failed { payload, .. }
            | Self::Cancelled { payload } => payload,
        }
    }
}

/// The quick-order sheet owned by one customer session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum OrderSheet {
    #[default]
    Closed,
    Open(OrderDraft),
    Submitting(PendingSubmit),
}

impl OrderSheet {
    /// Open a fresh draft for `product`, discarding any current draft.
    ///
    /// An in-flight submit is discarded too; its result will not touch the
    /// new draft.
    pub fn open(&mut self, product: Product, currency: CurrencyCode) {
        *self = Self::Open(OrderDraft::open(product, currency));
    }

    /// Discard the draft unconditionally.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// The current draft, open or submitting.
    #[must_use]
    pub const fn draft(&self) -> Option<&OrderDraft> {
        match self {
            Self::Closed => None,
            Self::Open(draft) | Self::Submitting(PendingSubmit { draft, .. }) => Some(draft),
        }
    }

    /// Whether a submit is waiting on its handoff.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Replace a field of the open draft.
    ///
    /// # Errors
    ///
    /// [`SheetError::NotOpen`] when closed, [`SheetError::SubmitInProgress`]
    /// while submitting.
    pub fn update_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), SheetError> {
        match self {
            Self::Open(draft) => {
                draft.set_field(field, value);
                Ok(())
            }
            Self::Submitting(_) => Err(SheetError::SubmitInProgress),
            Self::Closed => Err(SheetError::NotOpen),
        }
    }

    /// Move `Open -> Submitting` and build the payload.
    ///
    /// # Errors
    ///
    /// Same as [`OrderSheet::update_field`]; a second submit while one is in
    /// flight is refused.
    pub fn begin_submit(&mut self) -> Result<Submission, SheetError> {
        self.begin_submit_at(Utc::now())
    }

    fn begin_submit_at(&mut self, now: DateTime<Utc>) -> Result<Submission, SheetError> {
        match std::mem::take(self) {
            Self::Open(draft) => {
                let submission = Submission {
                    ticket: Uuid::new_v4(),
                    payload: draft.to_payload(),
                };
                *self = Self::Submitting(PendingSubmit {
                    ticket: submission.ticket,
                    started_at: now,
                    draft,
                });
                Ok(submission)
            }
            other @ Self::Submitting(_) => {
                *self = other;
                Err(SheetError::SubmitInProgress)
            }
            Self::Closed => Err(SheetError::NotOpen),
        }
    }

    /// Settle a submit: close on success, reopen the draft on failure.
    ///
    /// Only the submit named by `submission` is settled. If the sheet was
    /// closed or replaced while the handoff ran, it is left untouched and a
    /// failure comes back as [`SubmitOutcome::Cancelled`].
    pub fn finish_submit(
        &mut self,
        submission: Submission,
        result: Result<Delivery, HandoffError>,
    ) -> SubmitOutcome {
        let Submission { ticket, payload } = submission;
        let current = matches!(self, Self::Submitting(pending) if pending.ticket == ticket);

        match result {
            Ok(delivery) => {
                if current {
                    self.close();
                }
                SubmitOutcome::Delivered { delivery, payload }
            }
            Err(err) if current => {
                if let Self::Submitting(pending) = std::mem::take(self) {
                    *self = Self::Open(pending.draft);
                }
                SubmitOutcome::Failed {
                    notice: Notice::for_failure(&err),
                    payload,
                }
            }
            Err(_) => SubmitOutcome::Cancelled { payload },
        }
    }

    /// Reopen a submit whose handoff never reported back.
    ///
    /// Returns `true` if the sheet changed.
    pub fn release_stale(&mut self, now: DateTime<Utc>) -> bool {
        let stale = matches!(
            self,
            Self::Submitting(pending)
                if now - pending.started_at > TimeDelta::seconds(SUBMIT_STALE_AFTER_SECS)
        );
        if !stale {
            return false;
        }
        if let Self::Submitting(pending) = std::mem::take(self) {
            *self = Self::Open(pending.draft);
        }
        true
    }

    /// Submit the open draft through `sink`.
    ///
    /// Handoff failures never surface as errors; they come back as
    /// [`SubmitOutcome::Failed`] with the draft reopened.
    ///
    /// # Errors
    ///
    /// Only the transition errors of [`OrderSheet::begin_submit`].
    pub async fn submit<S: HandoffSink>(&mut self, sink: &S) -> Result<SubmitOutcome, SheetError> {
        let submission = self.begin_submit()?;
        let result = sink.deliver(&submission.payload).await;
        Ok(self.finish_submit(submission, result))
    }
}
