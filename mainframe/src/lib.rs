//! Main mainframe crate: bootstrap an embedded document store in one call.
//!
//! This crate is the primary entry point for users of the mainframe framework. It re-exports
//! the core types from `mainframe-core`, the in-memory engine, and ships the application's
//! standard collection set.
//!
//! # Features
//!
//! - **Sequenced bootstrap** - Plugins, store, then collections and their hooks, one at a time
//! - **Declarative collections** - Collection sets are JSON settings, swappable per deployment
//! - **Checked middleware** - Hook kinds are a closed set; unknown identifiers are configuration errors
//! - **Pluggable engines** - Any engine implementing the `engine` traits can be bootstrapped
//!
//! # Quick Start
//!
//! ```ignore
//! use mainframe::{prelude::*, memory::InMemoryEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = InMemoryEngine::new();
//!
//!     // Standard collection set under the standard store name
//!     let store = mainframe(&engine, "memory", &ConnectionOptions::default(), None, TracingLogger).await?;
//!
//!     println!("collections: {:?}", store.list_collections().await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom collection sets
//!
//! ```ignore
//! use mainframe::{prelude::*, memory::{InMemoryEngine, InMemoryPlugin}};
//! use serde_json::json;
//!
//! let engine = InMemoryEngine::new();
//! let registry = HookRegistry::default().with_alias("onSave", HookKind::PreSave);
//!
//! let store = Bootstrap::new(&engine)
//!     .store_name("school")
//!     .plugin(InMemoryPlugin::SchemaCheck)
//!     .hook_registry(registry)
//!     .logger(TracingLogger)
//!     .run(
//!         "memory",
//!         &ConnectionOptions::default(),
//!         vec![
//!             CollectionConfig::new("students", json!({ "type": "object" })),
//!             CollectionConfig::new("teachers", json!({ "type": "object" }))
//!                 .hook("onSave", hook_fn(|_doc| Ok(()))),
//!         ],
//!     )
//!     .await?;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-process engine for development and testing (requires `memory` feature)

pub mod defaults;
pub mod prelude;

pub use mainframe_core::{bootstrap, collection, diagnostics, engine, error, hook, plugin, settings};

// Re-export BSON types for convenience
pub use bson;

/// In-memory engine implementation.
///
/// This module is only available when the `memory` feature is enabled.
#[cfg(feature = "memory")]
pub mod memory {
    pub use mainframe_memory::{InMemoryCollection, InMemoryEngine, InMemoryPlugin, InMemoryStore, MEMORY_ADAPTER};
}
