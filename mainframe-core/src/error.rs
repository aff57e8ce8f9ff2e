//! Error types and result types for store bootstrap.
//!
//! Errors fall into three groups:
//!
//! - [`ConfigurationError`] - the input to a bootstrap run is unusable. Raised before the engine
//!   is touched wherever possible.
//! - [`EngineError`] - the document-store engine refused an operation. Engines produce these and
//!   the bootstrap coordinator propagates them unchanged.
//! - [`BootstrapError::HookBinding`] - a specific hook could not be bound to a collection.
//!
//! Use [`BootstrapResult<T>`] as the return type for fallible bootstrap operations and
//! [`EngineResult<T>`] inside engine implementations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::hook::HookKind;

/// Problems with the configuration handed to a bootstrap run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The collection list was empty or absent.
    #[error("configs array for initializing database collections cannot be empty or undefined")]
    EmptyConfigList,
    /// A collection config at the given position has an empty name.
    #[error("collection config at position {0} has an empty name")]
    EmptyCollectionName(usize),
    /// A hook binding used a hook-kind identifier the registry does not know.
    #[error("unknown hook kind '{0}'")]
    UnknownHookKind(String),
    /// A declarative collection entry referenced a named hook missing from the hook library.
    /// The first argument is the hook name, the second is the collection name.
    #[error("unknown hook '{0}' referenced by collection {1}")]
    UnknownHook(String, String),
    /// A settings document could not be parsed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors reported by a document-store engine.
///
/// The bootstrap coordinator never inspects or rewrites these; they reach the caller as the
/// engine produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine has no storage adapter with the given identifier.
    #[error("Unknown adapter: {0}")]
    UnknownAdapter(String),
    /// The store could not be opened or the connection was lost.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A plugin could not be registered.
    #[error("Plugin error: {0}")]
    Plugin(String),
    /// A collection with the given name already exists in the store.
    #[error("Collection already exists: {0}")]
    CollectionExists(String),
    /// The requested collection does not exist in the store.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// The schema given for a collection was rejected.
    /// The first argument is the collection name, the second the reason.
    #[error("Invalid schema for collection {0}: {1}")]
    InvalidSchema(String, String),
    /// The engine does not support the given hook kind (yet; a plugin may add it).
    #[error("Unsupported hook kind: {0}")]
    UnsupportedHook(HookKind),
    /// The requested document was not found in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// A bound hook rejected a document operation.
    #[error("Hook {0} rejected operation: {1}")]
    HookRejected(HookKind, String),
    /// Any other failure inside the engine.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Represents all possible errors that can occur while bootstrapping a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The run was misconfigured.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The engine failed to register a plugin, open the store or create a collection.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Binding a hook to a freshly created collection failed.
    #[error("Failed to bind {kind} hook on collection {collection}: {source}")]
    HookBinding {
        collection: String,
        kind: HookKind,
        #[source]
        source: EngineError,
    },
}

/// A specialized `Result` type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<SerdeJsonError> for ConfigurationError {
    fn from(err: SerdeJsonError) -> Self {
        ConfigurationError::InvalidSettings(err.to_string())
    }
}

impl From<SerdeJsonError> for BootstrapError {
    fn from(err: SerdeJsonError) -> Self {
        BootstrapError::Configuration(err.into())
    }
}
