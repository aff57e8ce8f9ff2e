//! Convenient re-exports of commonly used types from mainframe.
//!
//! ```ignore
//! use mainframe::prelude::*;
//! ```
//!
//! This provides access to:
//! - The bootstrap entry points and builder
//! - Collection configs, schemas and settings
//! - Hook kinds, hook functions and the registry
//! - Engine traits, loggers and error types

pub use mainframe_core::{
    bootstrap::{Bootstrap, bootstrap, initialize_collections, DEFAULT_ADAPTER, DEFAULT_STORE_NAME},
    collection::{CollectionConfig, CollectionSpec, ConfigList, Schema},
    diagnostics::{DiagnosticEvent, Logger, NoopLogger, TracingLogger},
    engine::{CollectionHandle, StoreEngine, StoreHandle},
    error::{BootstrapError, BootstrapResult, ConfigurationError, EngineError, EngineResult},
    hook::{Hook, HookBindings, HookKind, HookLibrary, HookRef, HookRegistry, hook_fn},
    plugin::apply_plugins,
    settings::{ConnectionOptions, MainframeSettings},
};

pub use crate::defaults::{DB_NAME, mainframe};
