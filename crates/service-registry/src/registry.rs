//! Service registry: stores and retrieves services by identifier
//!
//! Every stored service satisfies the registry's [`Contract`]. Identifiers
//! are unique; registering one twice is an error rather than a replacement.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{RegistryConfig, DEFAULT_CONTEXT};
use crate::contract::Contract;
use crate::error::{RegistryError, Result};
use crate::value::{ServiceValue, ValueKind};

/// Registry of services sharing a capability contract
pub struct ServiceRegistry<S: ?Sized> {
    /// Registered services, keyed by identifier
    services: HashMap<String, Arc<S>>,
    /// Registered identifiers in registration order
    identifiers: Vec<String>,
    contract: Contract<S>,
    /// Human readable label, e.g. "grid field"
    context: String,
}

impl<S: ?Sized + 'static> ServiceRegistry<S> {
    /// Create an empty registry with the default "service" context
    pub fn new(contract: Contract<S>) -> Self {
        Self::with_context(contract, DEFAULT_CONTEXT)
    }

    pub fn with_context(contract: Contract<S>, context: impl Into<String>) -> Self {
        Self {
            services: HashMap::new(),
            identifiers: Vec::new(),
            contract,
            context: context.into(),
        }
    }

    pub fn from_config(contract: Contract<S>, config: &RegistryConfig) -> Self {
        let contract = match &config.contract_name {
            Some(name) => contract.renamed(name.clone()),
            None => contract,
        };
        Self::with_context(contract, config.context.clone())
    }

    /// All registered services
    pub fn all(&self) -> &HashMap<String, Arc<S>> {
        &self.services
    }

    /// Register a service under `identifier`
    ///
    /// The contract is enforced by the type of `service`.
    pub fn register(&mut self, identifier: impl Into<String>, service: Arc<S>) -> Result<()> {
        let identifier = identifier.into();
        self.ensure_vacant(&identifier)?;
        self.insert(identifier, service);
        Ok(())
    }

    /// Register a type-erased value under `identifier`
    ///
    /// The value must be an object whose type was declared an implementor of
    /// the contract. On failure the registry is left untouched.
    pub fn register_value(
        &mut self,
        identifier: impl Into<String>,
        value: ServiceValue,
    ) -> Result<()> {
        let identifier = identifier.into();
        self.ensure_vacant(&identifier)?;

        if let ValueKind::Primitive(label) = value.kind() {
            tracing::warn!(
                context = %self.context,
                identifier = %identifier,
                given = label,
                "Rejected non-object service"
            );
            return Err(RegistryError::NotAnObject {
                context: self.context.clone(),
                actual: label.to_string(),
            });
        }

        let actual = value.describe();
        let service = match self.contract.admit(value) {
            Some(service) => service,
            None => {
                tracing::warn!(
                    context = %self.context,
                    identifier = %identifier,
                    contract = %self.contract.name(),
                    given = %actual,
                    "Rejected service not satisfying contract"
                );
                return Err(RegistryError::ContractNotSatisfied {
                    context: self.context.clone(),
                    expected: self.contract.name().to_string(),
                    actual,
                });
            }
        };

        self.insert(identifier, service);
        Ok(())
    }

    /// Remove a service, returning it
    pub fn unregister(&mut self, identifier: &str) -> Result<Arc<S>> {
        let service = self
            .services
            .remove(identifier)
            .ok_or_else(|| self.not_found(identifier))?;
        self.identifiers.retain(|id| id != identifier);

        tracing::debug!(context = %self.context, identifier, "Service unregistered");
        Ok(service)
    }

    /// Check if an identifier is registered
    pub fn has(&self, identifier: &str) -> bool {
        self.services.contains_key(identifier)
    }

    /// Get a service by identifier
    ///
    /// The registry keeps its own reference; the caller receives a shared one.
    pub fn get(&self, identifier: &str) -> Result<Arc<S>> {
        self.get_ref(identifier).map(Arc::clone)
    }

    /// Borrow a service by identifier
    pub fn get_ref(&self, identifier: &str) -> Result<&Arc<S>> {
        self.services
            .get(identifier)
            .ok_or_else(|| self.not_found(identifier))
    }

    /// Registered identifiers in registration order
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Services in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<S>)> + '_ {
        self.identifiers
            .iter()
            .filter_map(|id| self.services.get(id).map(|service| (id.as_str(), service)))
    }

    /// Total number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn contract(&self) -> &Contract<S> {
        &self.contract
    }

    fn ensure_vacant(&self, identifier: &str) -> Result<()> {
        if self.has(identifier) {
            tracing::warn!(
                context = %self.context,
                identifier,
                "Rejected duplicate service identifier"
            );
            return Err(RegistryError::ExistingService {
                context: self.context.clone(),
                identifier: identifier.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, identifier: String, service: Arc<S>) {
        tracing::debug!(context = %self.context, identifier = %identifier, "Service registered");
        self.identifiers.push(identifier.clone());
        self.services.insert(identifier, service);
    }

    fn not_found(&self, identifier: &str) -> RegistryError {
        RegistryError::NonExistingService {
            context: self.context.clone(),
            identifier: identifier.to_string(),
            known: self.identifiers.clone(),
        }
    }
}

impl<S: ?Sized> Clone for ServiceRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            identifiers: self.identifiers.clone(),
            contract: self.contract.clone(),
            context: self.context.clone(),
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for ServiceRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("context", &self.context)
            .field("contract", &self.contract)
            .field("identifiers", &self.identifiers)
            .finish()
    }
}
