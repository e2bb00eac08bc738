//! Email compose handoff.

use sole_gifts_core::{Delivery, Email, HandoffError, HandoffSink, MailtoLink, Payload};

/// Builds a `mailto:` link for the customer's mail client.
///
/// Nothing is sent from the server, so delivery cannot fail.
#[derive(Debug, Clone)]
pub struct MailtoSink {
    recipient: Email,
}

impl MailtoSink {
    #[must_use]
    pub const fn new(recipient: Email) -> Self {
        Self { recipient }
    }
}

impl HandoffSink for MailtoSink {
    async fn deliver(&self, payload: &Payload) -> Result<Delivery, HandoffError> {
        Ok(Delivery::Compose(MailtoLink::new(&self.recipient, payload)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sole_gifts_core::{Catalog, DraftField, OrderDraft};

    use super::*;

    #[tokio::test]
    async fn test_link_carries_subject_and_body() {
        let catalog = Catalog::sample();
        let product = catalog.get("lux-holiday-1").unwrap().clone();
        let payload = OrderDraft::open(product, catalog.currency())
            .update_field(DraftField::Name, "Sam Lee")
            .update_field(DraftField::Email, "sam@example.com")
            .to_payload();

        let sink = MailtoSink::new(Email::parse("orders@solegifts.example").unwrap());
        let Delivery::Compose(link) = sink.deliver(&payload).await.unwrap() else {
            panic!("expected compose link");
        };

        assert!(link.as_str().contains("subject=Order%3A%20Luxury%20Holiday%20Cozy%20Box"));
        assert!(link.as_str().contains("Name%3A%20Sam%20Lee"));
        assert!(link.as_str().contains("%0D%0A"));
    }
}
