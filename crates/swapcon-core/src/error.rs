//! Error types for swapcon-core

use crate::Category;

/// Result type for swapcon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, resolving or storing connections
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config source named a category that isn't recognised
    #[error("The config type \"{category}\" is not valid (try one of: {available})")]
    UnknownCategory { category: String, available: String },

    /// A group was declared without any members
    #[error("The {category} group \"{group}\" is empty")]
    EmptyGroup { category: Category, group: String },

    /// The connection to clone from isn't present in the config store
    #[error("The {category} connection to clone \"{template}\" was not found")]
    TemplateNotFound { category: Category, template: String },

    /// Resolution ran out of rules to apply
    #[error("The connection \"{category}.{connection}\" could not be resolved")]
    Unresolvable {
        category: Category,
        connection: String,
    },

    /// A concrete connection exists and overwriting wasn't permitted
    #[error("The connection \"{category}.{connection}\" cannot be stored, it already exists")]
    AlreadyExists {
        category: Category,
        connection: String,
    },

    /// Resolution looped, most likely through circular fallbacks or groups
    #[error(
        "The connection \"{category}.{connection}\" could not be resolved - it seems to have circular references that loop indefinitely"
    )]
    MaxRecursionExceeded {
        category: Category,
        connection: String,
    },

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error was raised while resolving a connection name.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::Unresolvable { .. } | Error::MaxRecursionExceeded { .. } | Error::AlreadyExists { .. }
        )
    }
}
