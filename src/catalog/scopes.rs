use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::factory::CatalogFactory;

/// Isolation key used when the embedding application has no scoping of
/// its own.
pub const DEFAULT_SCOPE: &str = "default";

/// Catalog factories keyed by isolation scope.
///
/// Lets several independent applications share one process without
/// seeing each other's catalogs. A factory is created lazily on first
/// access to its key and the same `Arc` is returned for repeated lookups
/// until the key is cleared.
#[derive(Default)]
pub struct CatalogScopes {
    factories: DashMap<String, Arc<CatalogFactory>>,
}

impl CatalogScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the factory for `scope`.
    pub fn instance(&self, scope: &str) -> Arc<CatalogFactory> {
        self.factories
            .entry(scope.to_string())
            .or_insert_with(|| {
                debug!(scope, "creating catalog factory");
                Arc::new(CatalogFactory::new())
            })
            .clone()
    }

    /// The factory for [`DEFAULT_SCOPE`].
    pub fn default_instance(&self) -> Arc<CatalogFactory> {
        self.instance(DEFAULT_SCOPE)
    }

    /// Forget the factory for `scope`, e.g. on application shutdown. The
    /// next [`instance`](Self::instance) call creates a fresh one.
    pub fn clear(&self, scope: &str) {
        if self.factories.remove(scope).is_some() {
            debug!(scope, "cleared catalog factory");
        }
    }

    pub fn scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        scopes.sort();
        scopes
    }
}
