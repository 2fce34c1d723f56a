//! Provider registry core implementation.

use crate::inference::provider::{adapter_for, ProviderAdapter};
use crate::inference::types::{GatewayError, ProviderProfile};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A provider's adapter together with its read-only profile.
#[derive(Clone)]
pub struct RegisteredProvider {
    /// Adapter speaking the provider's wire family
    pub adapter: Arc<dyn ProviderAdapter>,
    /// Connection and model settings
    pub profile: Arc<ProviderProfile>,
}

/// A registry for managing multiple generation backends.
///
/// Requests name their provider; an empty name routes to the default.
pub struct ProviderRegistry {
    pub(crate) providers: RwLock<HashMap<String, RegisteredProvider>>,
    pub(crate) default_provider: RwLock<Option<String>>,
}

impl ProviderRegistry {
    /// Creates a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            default_provider: RwLock::new(None),
        }
    }

    /// Registers a profile with the adapter matching its wire family
    pub fn register(&self, profile: ProviderProfile) {
        let adapter = adapter_for(&profile);
        self.register_with_adapter(profile, adapter);
    }

    /// Registers a profile served by an explicit adapter
    pub fn register_with_adapter(&self, profile: ProviderProfile, adapter: Arc<dyn ProviderAdapter>) {
        let name = profile.name.clone();
        debug!(provider_name = %name, api_style = ?profile.api_style, "Registering provider");
        let mut providers = self.providers.write();
        providers.insert(
            name,
            RegisteredProvider {
                adapter,
                profile: Arc::new(profile),
            },
        );
    }

    /// Sets the default provider name
    pub fn set_default(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(provider_name = %name, "Setting default provider");
        let mut default = self.default_provider.write();
        *default = Some(name);
    }

    /// Gets a provider by name
    pub fn get(&self, name: &str) -> Option<RegisteredProvider> {
        let providers = self.providers.read();
        providers.get(name).cloned()
    }

    /// Gets the default provider
    ///
    /// Without an explicit default, a lone registered provider is the
    /// default. With several and none chosen there is no default.
    pub fn default_provider(&self) -> Option<RegisteredProvider> {
        let default_name = {
            let default = self.default_provider.read();
            default.clone()
        };

        if let Some(name) = default_name {
            self.get(&name)
        } else {
            let providers = self.providers.read();
            if providers.len() == 1 {
                providers.values().next().cloned()
            } else {
                None
            }
        }
    }

    /// Resolves a request's provider name; empty selects the default.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if no such provider is registered.
    pub fn resolve(&self, name: &str) -> Result<RegisteredProvider, GatewayError> {
        if name.is_empty() {
            return self.default_provider().ok_or_else(|| {
                GatewayError::Configuration("No default provider configured".to_string())
            });
        }
        self.get(name)
            .ok_or_else(|| GatewayError::Configuration(format!("Provider not found: {name}")))
    }

    /// Lists all registered provider names
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read();
        providers.keys().cloned().collect()
    }

    /// Returns the number of registered providers
    pub fn len(&self) -> usize {
        let providers = self.providers.read();
        providers.len()
    }

    /// Returns true if no providers are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a provider by name
    pub fn remove(&self, name: &str) -> Option<RegisteredProvider> {
        debug!(provider_name = %name, "Removing provider");
        let mut providers = self.providers.write();
        providers.remove(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
