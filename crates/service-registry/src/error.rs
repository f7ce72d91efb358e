//! Registry error types

use thiserror::Error;

/// Registry errors
///
/// Every variant carries the registry's context label so messages read
/// naturally for the kind of thing being registered ("Grid field ...").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{} with identifier \"{identifier}\" already exists.", capitalize(.context))]
    ExistingService { context: String, identifier: String },

    #[error(
        "{} with identifier \"{identifier}\" does not exist, {}.",
        capitalize(.context),
        available(.context, .known)
    )]
    NonExistingService {
        context: String,
        identifier: String,
        /// Identifiers registered at the time of the failed lookup
        known: Vec<String>,
    },

    #[error("{} needs to be an object, {actual} given.", capitalize(.context))]
    NotAnObject { context: String, actual: String },

    #[error(
        "{} needs to implement \"{expected}\", \"{actual}\" given.",
        capitalize(.context)
    )]
    ContractNotSatisfied {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("Lock error")]
    Lock,
}

/// Coarse classification of [`RegistryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The identifier is already registered
    ExistingService,
    /// The identifier is not registered
    NonExistingService,
    /// The value is not an object or does not satisfy the contract
    InvalidArgument,
    /// The shared registry's lock was poisoned
    Lock,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExistingService { .. } => ErrorKind::ExistingService,
            Self::NonExistingService { .. } => ErrorKind::NonExistingService,
            Self::NotAnObject { .. } | Self::ContractNotSatisfied { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Lock => ErrorKind::Lock,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Context label of the registry that raised the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ExistingService { context, .. }
            | Self::NonExistingService { context, .. }
            | Self::NotAnObject { context, .. }
            | Self::ContractNotSatisfied { context, .. } => Some(context),
            Self::Lock => None,
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn available(context: &str, known: &[String]) -> String {
    if known.is_empty() {
        format!("no {context} identifiers are registered")
    } else {
        format!("available {context} identifiers: {}", known.join(", "))
    }
}
