//! Clipboard handoff.

use std::sync::Arc;
use std::time::Duration;

use sole_gifts_core::{Delivery, HandoffError, HandoffSink, Payload};

/// Something that can hold a text blob, usually the system clipboard.
pub trait ClipboardBackend: Send + Sync {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError::Clipboard`] with the platform's message.
    fn write_text(&self, text: &str) -> Result<(), HandoffError>;
}

/// The host's system clipboard.
///
/// Opened per write; fails on machines without a display server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), HandoffError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| HandoffError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| HandoffError::Clipboard(e.to_string()))
    }
}

/// How long a clipboard write may block before the handoff fails.
pub const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Copies the payload text to a clipboard.
#[derive(Clone)]
pub struct ClipboardSink {
    backend: Arc<dyn ClipboardBackend>,
    timeout: Duration,
}

impl ClipboardSink {
    /// Create a sink writing to `backend` with [`CLIPBOARD_TIMEOUT`].
    #[must_use]
    pub fn new(backend: Arc<dyn ClipboardBackend>) -> Self {
        Self::with_timeout(backend, CLIPBOARD_TIMEOUT)
    }

    /// Create a sink that gives up on a write after `timeout`.
    #[must_use]
    pub fn with_timeout(backend: Arc<dyn ClipboardBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }
}

impl HandoffSink for ClipboardSink {
    async fn deliver(&self, payload: &Payload) -> Result<Delivery, HandoffError> {
        let backend = Arc::clone(&self.backend);
        let text = payload.text();

        // Clipboard access blocks on the display server. A write that never
        // returns is left on the blocking pool.
        let write = tokio::task::spawn_blocking(move || backend.write_text(&text));
        let joined = tokio::time::timeout(self.timeout, write)
            .await
            .map_err(|_| HandoffError::Clipboard("clipboard did not respond".to_string()))?;
        joined.map_err(|e| HandoffError::Clipboard(e.to_string()))??;

        Ok(Delivery::Copied)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use sole_gifts_core::{Catalog, DraftField, OrderDraft};

    use super::*;

    #[derive(Default)]
    struct MemoryClipboard(Mutex<Option<String>>);

    impl ClipboardBackend for MemoryClipboard {
        fn write_text(&self, text: &str) -> Result<(), HandoffError> {
            *self.0.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl ClipboardBackend for DeniedClipboard {
        fn write_text(&self, _text: &str) -> Result<(), HandoffError> {
            Err(HandoffError::Clipboard("permission denied".to_string()))
        }
    }

    fn payload() -> Payload {
        let catalog = Catalog::sample();
        let product = catalog.get("classic-tea-1").unwrap().clone();
        OrderDraft::open(product, catalog.currency())
            .update_field(DraftField::Notes, "Green ribbon")
            .to_payload()
    }

    #[tokio::test]
    async fn test_copies_payload_text() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let sink = ClipboardSink::new(clipboard.clone());
        let payload = payload();

        let delivery = sink.deliver(&payload).await.unwrap();

        assert_eq!(delivery, Delivery::Copied);
        assert_eq!(
            clipboard.0.lock().unwrap().as_deref(),
            Some(payload.text().as_str())
        );
    }

    struct StuckClipboard;

    impl ClipboardBackend for StuckClipboard {
        fn write_text(&self, _text: &str) -> Result<(), HandoffError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stuck_write_times_out() {
        let sink = ClipboardSink::with_timeout(Arc::new(StuckClipboard), Duration::from_millis(20));
        let err = sink.deliver(&payload()).await.unwrap_err();
        assert!(matches!(err, HandoffError::Clipboard(_)));
    }

    #[tokio::test]
    async fn test_propagates_backend_failure() {
        let sink = ClipboardSink::new(Arc::new(DeniedClipboard));
        let err = sink.deliver(&payload()).await.unwrap_err();
        assert_eq!(err, HandoffError::Clipboard("permission denied".to_string()));
    }
}
