//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Context label used when none is configured.
pub const DEFAULT_CONTEXT: &str = "service";

/// Configuration for a [`ServiceRegistry`](crate::ServiceRegistry).
///
/// Host applications typically embed this in their own configuration file,
/// one entry per registry (e.g. one for "grid field", one for "filter").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Human readable label for the registered services, used in diagnostics.
    pub context: String,

    /// Overrides the contract's diagnostic name.
    pub contract_name: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT.to_string(),
            contract_name: None,
        }
    }
}

impl RegistryConfig {
    /// Config with the given context and no contract name override.
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            ..Self::default()
        }
    }

    /// Set the contract name override.
    pub fn contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let config = RegistryConfig::default();
        assert_eq!(config.context, "service");
        assert!(config.contract_name.is_none());
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::with_context("grid field").contract_name("Renderable");
        assert_eq!(config.context, "grid field");
        assert_eq!(config.contract_name.as_deref(), Some("Renderable"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RegistryConfig = serde_json::from_str(r#"{"context": "grid field"}"#).unwrap();
        assert_eq!(config, RegistryConfig::with_context("grid field"));

        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = RegistryConfig::with_context("filter").contract_name("FilterInterface");
        let json = serde_json::to_string(&config).unwrap();
        let back: RegistryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
