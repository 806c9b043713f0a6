use std::sync::Arc;

use linkshelf_core::LinkStorage;
use linkshelf_redirector::{RedirectMetrics, RedirectorService};
use prometheus::Registry;

#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn LinkStorage>,
    redirector: RedirectorService<dyn LinkStorage>,
    registry: Registry,
}

impl AppState {
    /// Builds the state around `storage` with a fresh metrics registry.
    pub fn new(storage: Arc<dyn LinkStorage>) -> prometheus::Result<Self> {
        Self::with_registry(storage, Registry::new())
    }

    pub fn with_registry(
        storage: Arc<dyn LinkStorage>,
        registry: Registry,
    ) -> prometheus::Result<Self> {
        let metrics = RedirectMetrics::register(&registry)?;
        Ok(Self {
            redirector: RedirectorService::new(Arc::clone(&storage), metrics),
            storage,
            registry,
        })
    }

    pub fn storage(&self) -> &dyn LinkStorage {
        self.storage.as_ref()
    }

    pub fn redirector(&self) -> &RedirectorService<dyn LinkStorage> {
        &self.redirector
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
