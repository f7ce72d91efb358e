//! Type-erased service candidates
//!
//! A [`ServiceValue`] lets callers hand the registry a value whose concrete
//! type is only known at runtime. The registry then decides whether the value
//! is an object at all and whether its type satisfies the contract.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// What kind of value a [`ServiceValue`] holds
///
/// Scalars, strings, sequences (`Vec`, `VecDeque`, arrays, slices) and
/// `Option` values are primitives. Anything else is an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A structured value that may implement a contract
    Object,
    /// A primitive value, labelled for diagnostics
    Primitive(&'static str),
}

/// A value offered for registration through the dynamic path
#[derive(Clone)]
pub struct ServiceValue {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value without reallocating it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> ValueKind {
        match primitive_label(self.type_id).or_else(|| container_label(self.type_name)) {
            Some(label) => ValueKind::Primitive(label),
            None => ValueKind::Object,
        }
    }

    pub fn is_object(&self) -> bool {
        self.kind() == ValueKind::Object
    }

    /// Label used in diagnostics: the primitive label or the short type name
    pub fn describe(&self) -> String {
        match self.kind() {
            ValueKind::Primitive(label) => label.to_string(),
            ValueKind::Object => short_type_name(self.type_name),
        }
    }

    pub(crate) fn into_any(self) -> Arc<dyn Any + Send + Sync> {
        self.value
    }
}

impl fmt::Debug for ServiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceValue")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind())
            .finish()
    }
}

fn primitive_label(id: TypeId) -> Option<&'static str> {
    macro_rules! label_of {
        ($label:literal => $($ty:ty),+) => {
            $(
                if id == TypeId::of::<$ty>() {
                    return Some($label);
                }
            )+
        };
    }

    label_of!("boolean" => bool);
    label_of!("integer" => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    label_of!("float" => f32, f64);
    label_of!("char" => char);
    label_of!("string" => &'static str, String, Box<str>, Arc<str>);
    label_of!("unit" => ());
    None
}

/// Label generic containers by their type name, whatever they hold
fn container_label(type_name: &str) -> Option<&'static str> {
    const SEQUENCES: [&str; 3] = [
        "alloc::vec::Vec<",
        "alloc::collections::vec_deque::VecDeque<",
        "alloc::boxed::Box<[",
    ];

    if type_name.starts_with('[') || SEQUENCES.iter().any(|p| type_name.starts_with(p)) {
        Some("array")
    } else if type_name.starts_with("core::option::Option<") {
        Some("option")
    } else {
        None
    }
}

/// Strip module paths and a leading `dyn ` from a type name.
///
/// Generic arguments keep their own short names, e.g.
/// `alloc::vec::Vec<my_app::Field>` becomes `Vec<Field>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let full = full.trim_start_matches("dyn ");
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                out.push_str(last_path_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TitleField;

    #[test]
    fn test_primitives_are_not_objects() {
        assert_eq!(ServiceValue::new("a string").kind(), ValueKind::Primitive("string"));
        assert_eq!(
            ServiceValue::new(String::from("owned")).kind(),
            ValueKind::Primitive("string")
        );
        assert_eq!(ServiceValue::new(42u32).kind(), ValueKind::Primitive("integer"));
        assert_eq!(ServiceValue::new(1.5f64).kind(), ValueKind::Primitive("float"));
        assert_eq!(ServiceValue::new(true).kind(), ValueKind::Primitive("boolean"));
        assert_eq!(ServiceValue::new(()).kind(), ValueKind::Primitive("unit"));
        assert!(!ServiceValue::new('x').is_object());
    }

    #[test]
    fn test_sequences_and_options_are_not_objects() {
        assert_eq!(
            ServiceValue::new(vec![TitleField]).kind(),
            ValueKind::Primitive("array")
        );
        assert_eq!(
            ServiceValue::new(vec![String::from("a")]).kind(),
            ValueKind::Primitive("array")
        );
        assert_eq!(ServiceValue::new([1u8, 2, 3]).kind(), ValueKind::Primitive("array"));
        assert_eq!(
            ServiceValue::new(std::collections::VecDeque::<u8>::new()).describe(),
            "array"
        );
        assert_eq!(
            ServiceValue::new(None::<TitleField>).kind(),
            ValueKind::Primitive("option")
        );
        assert_eq!(ServiceValue::new(Some(TitleField)).describe(), "option");
    }

    #[test]
    fn test_structs_are_objects() {
        let value = ServiceValue::new(TitleField);
        assert!(value.is_object());
        assert_eq!(value.type_id(), TypeId::of::<TitleField>());
        assert_eq!(value.describe(), "TitleField");
    }

    #[test]
    fn test_describe_primitive() {
        assert_eq!(ServiceValue::new(7i64).describe(), "integer");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("dyn my_app::fields::Renderable"), "Renderable");
        assert_eq!(
            short_type_name("alloc::vec::Vec<my_app::Field>"),
            "Vec<Field>"
        );
        assert_eq!(
            short_type_name("std::collections::HashMap<alloc::string::String, u8>"),
            "HashMap<String, u8>"
        );
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
