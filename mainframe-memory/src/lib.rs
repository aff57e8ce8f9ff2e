//! In-memory document-store engine for mainframe.
//!
//! This crate provides the `memory` storage adapter: an engine implementing the
//! `mainframe-core` engine traits entirely in process memory. It is meant for development,
//! tests and small embedded deployments.
//!
//! # Features
//!
//! - **Shared stores** - Stores opened under the same name share their collections
//! - **Ordered collections** - Collections are listed in creation order
//! - **Working hooks** - Bound hooks run around `insert`, `save` and `remove`
//! - **Plugins** - [`InMemoryPlugin::SchemaCheck`] and [`InMemoryPlugin::LifecycleHooks`]
//!
//! # Quick Start
//!
//! ```ignore
//! use mainframe_core::{bootstrap::bootstrap, collection::CollectionConfig, diagnostics::NoopLogger, settings::ConnectionOptions};
//! use mainframe_memory::InMemoryEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = InMemoryEngine::new();
//!     let store = bootstrap(
//!         &engine,
//!         "memory",
//!         &ConnectionOptions::default(),
//!         None,
//!         vec![CollectionConfig::new("students", serde_json::json!({}))],
//!         NoopLogger,
//!     )
//!     .await?;
//!
//!     let students = store.collection("students").await.unwrap();
//!     students.insert(bson::doc! { "name": "Ada" }).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as mainframe_memory;

pub mod engine;
pub mod store;

pub use engine::{InMemoryEngine, InMemoryPlugin, MEMORY_ADAPTER};
pub use store::{InMemoryCollection, InMemoryStore};
