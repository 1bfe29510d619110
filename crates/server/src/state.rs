//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::FixtureConfig;
use crate::store::FixtureStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every clone points at the
/// same [`FixtureStore`], so state written by one request is visible to the
/// next until `/reset`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: FixtureConfig,
    store: FixtureStore,
}

impl AppState {
    /// Create application state around an empty store.
    #[must_use]
    pub fn new(config: FixtureConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: FixtureStore::new(),
            }),
        }
    }

    /// Get a reference to the fixture configuration.
    #[must_use]
    pub fn config(&self) -> &FixtureConfig {
        &self.inner.config
    }

    /// Get a reference to the fixture store.
    #[must_use]
    pub fn store(&self) -> &FixtureStore {
        &self.inner.store
    }
}
