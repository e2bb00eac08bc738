//! Application state shared across handlers.

use std::sync::Arc;

use sole_gifts_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::Handoff;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    handoff: Handoff,
}

impl AppState {
    /// Create state using the handoff channel named in `config`.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let handoff = Handoff::from_config(&config.order);
        Self::with_handoff(config, catalog, handoff)
    }

    /// Create state with an explicit handoff channel.
    #[must_use]
    pub fn with_handoff(config: StorefrontConfig, catalog: Catalog, handoff: Handoff) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                handoff,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The channel submitted orders are handed to.
    #[must_use]
    pub fn handoff(&self) -> &Handoff {
        &self.inner.handoff
    }
}
