//! Log handoff: the order is recorded as a structured log event.

use sole_gifts_core::{Delivery, HandoffError, HandoffSink, Payload};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl HandoffSink for LogSink {
    async fn deliver(&self, payload: &Payload) -> Result<Delivery, HandoffError> {
        let order = serde_json::to_string(payload)
            .map_err(|e| HandoffError::Unavailable(format!("failed to encode order: {e}")))?;

        tracing::info!(
            target: "sole_gifts::orders",
            product_id = %payload.product_id,
            total = %payload.total,
            %order,
            "Quick order received"
        );

        Ok(Delivery::Logged)
    }
}
