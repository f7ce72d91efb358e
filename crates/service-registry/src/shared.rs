//! Thread-safe registry wrapper
//!
//! [`ServiceRegistry`] needs `&mut self` to change. When several threads
//! must register and look up services, [`SharedServiceRegistry`] guards the
//! whole registry with one lock so the service map and the identifier index
//! always change together.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::RegistryConfig;
use crate::contract::Contract;
use crate::error::{RegistryError, Result};
use crate::registry::ServiceRegistry;
use crate::value::ServiceValue;

/// Service registry shareable across threads
pub struct SharedServiceRegistry<S: ?Sized> {
    inner: RwLock<ServiceRegistry<S>>,
}

impl<S: ?Sized + 'static> SharedServiceRegistry<S> {
    pub fn new(contract: Contract<S>) -> Self {
        Self::from_registry(ServiceRegistry::new(contract))
    }

    pub fn with_context(contract: Contract<S>, context: impl Into<String>) -> Self {
        Self::from_registry(ServiceRegistry::with_context(contract, context))
    }

    pub fn from_config(contract: Contract<S>, config: &RegistryConfig) -> Self {
        Self::from_registry(ServiceRegistry::from_config(contract, config))
    }

    /// Wrap an existing registry, keeping its entries
    pub fn from_registry(registry: ServiceRegistry<S>) -> Self {
        Self {
            inner: RwLock::new(registry),
        }
    }

    /// Snapshot of all registered services
    pub fn all(&self) -> Result<HashMap<String, Arc<S>>> {
        Ok(self.read()?.all().clone())
    }

    pub fn register(&self, identifier: impl Into<String>, service: Arc<S>) -> Result<()> {
        self.write()?.register(identifier, service)
    }

    pub fn register_value(&self, identifier: impl Into<String>, value: ServiceValue) -> Result<()> {
        self.write()?.register_value(identifier, value)
    }

    pub fn unregister(&self, identifier: &str) -> Result<Arc<S>> {
        self.write()?.unregister(identifier)
    }

    pub fn has(&self, identifier: &str) -> Result<bool> {
        Ok(self.read()?.has(identifier))
    }

    pub fn get(&self, identifier: &str) -> Result<Arc<S>> {
        self.read()?.get(identifier)
    }

    /// Snapshot of registered identifiers in registration order
    pub fn identifiers(&self) -> Result<Vec<String>> {
        Ok(self.read()?.identifiers().to_vec())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Copy of the current registry state
    pub fn snapshot(&self) -> Result<ServiceRegistry<S>> {
        Ok(self.read()?.clone())
    }

    /// Unwrap into the inner registry
    pub fn into_inner(self) -> Result<ServiceRegistry<S>> {
        self.inner.into_inner().map_err(|_| RegistryError::Lock)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ServiceRegistry<S>>> {
        self.inner.read().map_err(|_| RegistryError::Lock)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ServiceRegistry<S>>> {
        self.inner.write().map_err(|_| RegistryError::Lock)
    }
}

impl<S: ?Sized + 'static> From<ServiceRegistry<S>> for SharedServiceRegistry<S> {
    fn from(registry: ServiceRegistry<S>) -> Self {
        Self::from_registry(registry)
    }
}
