//! Service Registry - identifier-keyed services bound to a capability contract
//!
//! A [`ServiceRegistry`] holds named service instances that all provide the
//! same capability, e.g. every "grid field" renderer of an admin panel:
//!
//! - **Contract**: the capability every service must provide, normally a
//!   trait object type such as `dyn Renderable`
//! - **Context**: a label like "grid field" used in error messages
//! - **Identifiers**: unique string keys, kept in registration order
//!
//! Registration, lookup and removal fail fast with a [`RegistryError`]
//! instead of replacing or silently ignoring entries.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use service_registry::{Contract, ErrorKind, ServiceRegistry, ServiceValue};
//!
//! trait Renderable: Send + Sync {
//!     fn render(&self, value: &str) -> String;
//! }
//!
//! struct TitleField;
//!
//! impl Renderable for TitleField {
//!     fn render(&self, value: &str) -> String {
//!         format!("<h1>{value}</h1>")
//!     }
//! }
//!
//! let contract = Contract::<dyn Renderable>::new("Renderable")
//!     .implementor(|field: Arc<TitleField>| -> Arc<dyn Renderable> { field });
//! let mut fields = ServiceRegistry::with_context(contract, "grid field");
//!
//! fields.register("title", Arc::new(TitleField)).unwrap();
//! assert_eq!(fields.get("title").unwrap().render("Hi"), "<h1>Hi</h1>");
//!
//! let err = fields.register_value("bad", ServiceValue::new("a string")).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidArgument);
//! assert_eq!(err.to_string(), "Grid field needs to be an object, string given.");
//! ```
//!
//! ## Sharing across threads
//!
//! [`ServiceRegistry`] is a plain single-owner value. Wrap it in a
//! [`SharedServiceRegistry`] when several threads need to mutate it.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod contract;
pub mod error;
pub mod registry;
pub mod shared;
pub mod value;

// Re-exports
pub use config::{RegistryConfig, DEFAULT_CONTEXT};
pub use contract::Contract;
pub use error::{ErrorKind, RegistryError, Result};
pub use registry::ServiceRegistry;
pub use shared::SharedServiceRegistry;
pub use value::{ServiceValue, ValueKind};
