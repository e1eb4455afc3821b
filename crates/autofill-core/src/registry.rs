//! Provider registry.

use dashmap::DashMap;
use std::sync::Arc;

use autofill_protocols::{BackendKind, ToolCallProvider};

use crate::error::RegistryError;

/// Maps each backend to the provider serving it.
pub struct ProviderRegistry {
    providers: DashMap<BackendKind, Arc<dyn ToolCallProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a provider under its own [`kind`](ToolCallProvider::kind).
    pub fn register(&self, provider: Arc<dyn ToolCallProvider>) -> Result<(), RegistryError> {
        let kind = provider.kind();
        if self.providers.contains_key(&kind) {
            return Err(RegistryError::AlreadyRegistered(kind));
        }
        self.providers.insert(kind, provider);
        Ok(())
    }

    pub fn unregister(&self, kind: BackendKind) -> Result<(), RegistryError> {
        self.providers
            .remove(&kind)
            .ok_or(RegistryError::NotFound(kind))?;
        Ok(())
    }

    pub fn get(&self, kind: BackendKind) -> Option<Arc<dyn ToolCallProvider>> {
        self.providers.get(&kind).map(|p| p.clone())
    }

    /// Registered backends in canonical order.
    pub fn kinds(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|k| self.providers.contains_key(k))
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
