//! Declarative bootstrap for embedded document stores.
//!
//! This crate is the core of the mainframe project and provides:
//!
//! - **Engine abstraction** ([`engine`]) - The capabilities bootstrap needs from a document-store engine
//! - **Collection configs** ([`collection`]) - Declarative descriptions of the collections to create
//! - **Hook registry** ([`hook`]) - Hook kinds, hook functions and their binding to collections
//! - **Plugin application** ([`plugin`]) - Ordered registration of engine extensions
//! - **Bootstrap coordinator** ([`bootstrap`]) - The sequenced run tying it all together
//! - **Diagnostics** ([`diagnostics`]) - Structured progress events and logger sinks
//! - **Settings** ([`settings`]) - Connection options and JSON bootstrap settings
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use mainframe_core::{
//!     bootstrap::bootstrap,
//!     collection::{CollectionConfig, Schema},
//!     diagnostics::TracingLogger,
//!     hook::hook_fn,
//!     settings::ConnectionOptions,
//! };
//! use serde_json::json;
//!
//! let store = bootstrap(
//!     &engine,
//!     "memory",
//!     &ConnectionOptions::default(),
//!     None,
//!     vec![
//!         CollectionConfig::new("students", Schema::new(json!({ "type": "object" }))),
//!         CollectionConfig::new("teachers", Schema::new(json!({ "type": "object" })))
//!             .hook("preSave", hook_fn(|_doc| Ok(()))),
//!     ],
//!     TracingLogger,
//! )
//! .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as mainframe_core;

pub mod bootstrap;
pub mod collection;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod hook;
pub mod plugin;
pub mod settings;
