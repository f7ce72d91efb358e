//! Capability contracts
//!
//! A [`Contract`] names the capability every service in a registry must
//! provide. Statically the contract is the type parameter `S` itself
//! (usually a trait object such as `dyn Renderable`): anything passed to
//! [`ServiceRegistry::register`](crate::ServiceRegistry::register) is already
//! an `Arc<S>`.
//!
//! Type-erased values registered through
//! [`ServiceRegistry::register_value`](crate::ServiceRegistry::register_value)
//! cannot be checked by the compiler. For those the contract keeps a table of
//! declared implementors, each with the upcast that turns the concrete type
//! into `Arc<S>`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::value::{short_type_name, ServiceValue};

type Upcast<S> = Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Arc<S>> + Send + Sync>;

struct Implementor<S: ?Sized> {
    type_name: &'static str,
    upcast: Upcast<S>,
}

impl<S: ?Sized> Clone for Implementor<S> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            upcast: Arc::clone(&self.upcast),
        }
    }
}

/// Capability contract required of every service in a registry
pub struct Contract<S: ?Sized> {
    name: String,
    implementors: HashMap<TypeId, Implementor<S>>,
    _marker: PhantomData<fn() -> Box<S>>,
}

impl<S: ?Sized + 'static> Contract<S> {
    /// Create a contract with an explicit diagnostic name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            implementors: HashMap::new(),
            _marker: PhantomData,
        }
    }

    /// Create a contract named after `S`
    pub fn of() -> Self {
        Self::new(short_type_name(std::any::type_name::<S>()))
    }

    /// Declare `T` as satisfying the contract
    ///
    /// `upcast` is normally the identity closure with an explicit signature,
    /// which lets the compiler perform the unsizing coercion:
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use service_registry::Contract;
    ///
    /// trait Renderable: Send + Sync {}
    /// struct TitleField;
    /// impl Renderable for TitleField {}
    ///
    /// let contract = Contract::<dyn Renderable>::new("Renderable")
    ///     .implementor(|field: Arc<TitleField>| -> Arc<dyn Renderable> { field });
    /// assert!(contract.is_implemented_by::<TitleField>());
    /// ```
    pub fn implementor<T, F>(mut self, upcast: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arc<T>) -> Arc<S> + Send + Sync + 'static,
    {
        let upcast: Upcast<S> = Arc::new(move |value: Arc<dyn Any + Send + Sync>| {
            value.downcast::<T>().ok().map(&upcast)
        });

        self.implementors.insert(
            TypeId::of::<T>(),
            Implementor {
                type_name: std::any::type_name::<T>(),
                upcast,
            },
        );
        self
    }

    /// Diagnostic name of the contract
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the diagnostic name, keeping declared implementors
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_implemented_by<T: Any>(&self) -> bool {
        self.implements(TypeId::of::<T>())
    }

    pub fn implements(&self, type_id: TypeId) -> bool {
        self.implementors.contains_key(&type_id)
    }

    /// Names of the declared implementor types, sorted
    pub fn implementor_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .implementors
            .values()
            .map(|imp| short_type_name(imp.type_name))
            .collect();
        names.sort();
        names
    }

    /// Convert a type-erased value into a contract instance
    ///
    /// Returns `None` when the value's type was never declared an implementor.
    pub fn admit(&self, value: ServiceValue) -> Option<Arc<S>> {
        let implementor = self.implementors.get(&value.type_id())?;
        (implementor.upcast)(value.into_any())
    }
}

impl<S: ?Sized> Clone for Contract<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            implementors: self.implementors.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S: ?Sized> fmt::Debug for Contract<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("name", &self.name)
            .field("implementors", &self.implementors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Renderable: Send + Sync {
        fn render(&self) -> String;
    }

    struct TitleField;

    impl Renderable for TitleField {
        fn render(&self) -> String {
            "title".into()
        }
    }

    struct PlainText;

    fn renderable() -> Contract<dyn Renderable> {
        Contract::new("Renderable")
            .implementor(|field: Arc<TitleField>| -> Arc<dyn Renderable> { field })
    }

    #[test]
    fn test_contract_name_from_type() {
        let contract = Contract::<dyn Renderable>::of();
        assert_eq!(contract.name(), "Renderable");
    }

    #[test]
    fn test_renamed_keeps_implementors() {
        let contract = renderable().renamed("Grid renderable");
        assert_eq!(contract.name(), "Grid renderable");
        assert!(contract.is_implemented_by::<TitleField>());
    }

    #[test]
    fn test_admit_declared_implementor() {
        let contract = renderable();
        let service = contract.admit(ServiceValue::new(TitleField)).unwrap();
        assert_eq!(service.render(), "title");
    }

    #[test]
    fn test_admit_rejects_undeclared_type() {
        let contract = renderable();
        assert!(!contract.is_implemented_by::<PlainText>());
        assert!(contract.admit(ServiceValue::new(PlainText)).is_none());
    }

    #[test]
    fn test_implementor_names() {
        let contract = renderable();
        assert_eq!(contract.implementor_names(), vec!["TitleField".to_string()]);
    }

    #[test]
    fn test_clone_shares_table() {
        let contract = renderable();
        let cloned = contract.clone();
        assert!(cloned.is_implemented_by::<TitleField>());
        assert_eq!(cloned.name(), contract.name());
    }
}
