//! Integration test harness for the Sole Gifts storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`.
//! [`TestClient`] carries the session cookie between requests like a browser
//! would, and the clipboard backends below stand in for the system clipboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sole-gifts-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use sole_gifts_core::{Catalog, Email, HandoffError};
use sole_gifts_storefront::config::StorefrontConfig;
use sole_gifts_storefront::services::{
    ClipboardBackend, ClipboardSink, Handoff, LogSink, MailtoSink,
};
use sole_gifts_storefront::state::AppState;
use tokio::sync::oneshot;
use tower::ServiceExt;

// =============================================================================
// App Construction
// =============================================================================

/// Router over the sample catalog with the given handoff channel.
pub fn app_with(handoff: Handoff) -> Router {
    let state = AppState::with_handoff(StorefrontConfig::default(), Catalog::sample(), handoff);
    sole_gifts_storefront::app(state)
}

/// Router whose clipboard channel writes to `backend`.
pub fn clipboard_app(backend: Arc<dyn ClipboardBackend>) -> Router {
    app_with(Handoff::Clipboard(ClipboardSink::new(backend)))
}

/// Router whose clipboard writes give up after `timeout`.
pub fn clipboard_app_with_timeout(backend: Arc<dyn ClipboardBackend>, timeout: Duration) -> Router {
    app_with(Handoff::Clipboard(ClipboardSink::with_timeout(backend, timeout)))
}

/// Router using the email compose channel.
pub fn email_app() -> Router {
    let recipient = Email::parse("orders@solegifts.example").unwrap();
    app_with(Handoff::Email(MailtoSink::new(recipient)))
}

/// Router using the log channel.
pub fn log_app() -> Router {
    app_with(Handoff::Log(LogSink))
}

// =============================================================================
// Client
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Header value as a string, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process browser: one session cookie jar over a shared router.
pub struct TestClient {
    router: Router,
    cookie: Mutex<Option<String>>,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookie: Mutex::new(None),
        }
    }

    /// A second browser over the same router (and session store).
    pub fn fresh_session(&self) -> Self {
        Self::new(self.router.clone())
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// POST an urlencoded form.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    /// Send with extra headers set by the caller.
    pub async fn send(&self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let cookie = self.cookie.lock().unwrap().clone();
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
            *self.cookie.lock().unwrap() = Some(pair);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

// =============================================================================
// Clipboard Backends
// =============================================================================

/// Clipboard that keeps everything written to it.
#[derive(Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), HandoffError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always refuses the write.
pub struct DeniedClipboard;

impl ClipboardBackend for DeniedClipboard {
    fn write_text(&self, _text: &str) -> Result<(), HandoffError> {
        Err(HandoffError::Clipboard("permission denied".to_string()))
    }
}

/// Clipboard whose first write blocks until released.
///
/// Holds a submit in flight so tests can act while the sheet is
/// `Submitting`.
pub struct GatedClipboard {
    entered: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
    result: Result<(), HandoffError>,
}

/// Handles for a [`GatedClipboard`].
pub struct Gate {
    /// Resolves once a write has started.
    pub entered: oneshot::Receiver<()>,
    /// Send to let the blocked write finish.
    pub release: mpsc::Sender<()>,
}

impl GatedClipboard {
    /// A gated clipboard whose write succeeds once released.
    pub fn new() -> (Arc<Self>, Gate) {
        Self::with_result(Ok(()))
    }

    /// A gated clipboard whose write fails once released.
    pub fn failing() -> (Arc<Self>, Gate) {
        Self::with_result(Err(HandoffError::Clipboard("clipboard busy".to_string())))
    }

    fn with_result(result: Result<(), HandoffError>) -> (Arc<Self>, Gate) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let clipboard = Arc::new(Self {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(release_rx),
            result,
        });
        (
            clipboard,
            Gate {
                entered: entered_rx,
                release: release_tx,
            },
        )
    }
}

impl ClipboardBackend for GatedClipboard {
    fn write_text(&self, _text: &str) -> Result<(), HandoffError> {
        if let Some(entered) = self.entered.lock().unwrap().take() {
            let _ = entered.send(());
        }
        let _ = self.release.lock().unwrap().recv();
        self.result.clone()
    }
}
