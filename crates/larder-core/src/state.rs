//! Application state for Larder.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use larder_llm::{GenerationConfig, GenerationService, ProviderConfig};
use larder_store::PantryStore;

use crate::config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Inventory store.
    pub store: Arc<PantryStore>,
    /// Text-generation relay.
    pub generator: GenerationService,
}

impl AppState {
    /// Create application state from the global configuration.
    pub fn new() -> Self {
        let config = config::config();

        let store = Arc::new(PantryStore::open(config.storage.data_path.clone()));

        let providers = config
            .generation
            .providers
            .iter()
            .map(|p| ProviderConfig {
                name: p.name.clone(),
                base_url: p.base_url.clone(),
                model: p.model.clone(),
                api_key: p.api_key.clone(),
                priority: p.priority,
            })
            .collect();
        let generator = GenerationService::new(&GenerationConfig { providers });

        Self { store, generator }
    }

    /// Create application state from explicit parts.
    ///
    /// Used by tests to run against an isolated store and an unconfigured
    /// or mocked relay.
    pub fn with_parts(store: Arc<PantryStore>, generator: GenerationService) -> Self {
        Self { store, generator }
    }
}
