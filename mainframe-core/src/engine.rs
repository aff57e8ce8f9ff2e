//! Document-store engine abstraction consumed by the bootstrap coordinator.
//!
//! The engine itself (storage adapters, persistence, document CRUD) lives outside this crate.
//! Bootstrap only needs four capabilities from it, split over three traits:
//!
//! - [`StoreEngine`]: process-wide plugin registration and opening stores
//! - [`StoreHandle`]: an open store, able to create collections
//! - [`CollectionHandle`]: a collection, able to bind hooks
//!
//! # Examples
//!
//! ```ignore
//! use mainframe_core::engine::{StoreEngine, StoreHandle};
//! use mainframe_core::settings::ConnectionOptions;
//!
//! let store = engine
//!     .open_store("carddemodb", "memory", &ConnectionOptions::default())
//!     .await?;
//! let students = store.create_collection("students", &schema).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    collection::Schema,
    error::EngineResult,
    hook::{HookKind, HookRef},
    settings::ConnectionOptions,
};

/// Entry point of a document-store engine.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Plugin registration is process-wide: a plugin
/// registered on an engine affects every store opened from it afterwards.
///
/// # Error Handling
///
/// Operations return [`EngineResult<T>`](crate::error::EngineResult). The bootstrap coordinator
/// propagates these errors to its caller unchanged.
#[async_trait]
pub trait StoreEngine: Send + Sync + Debug {
    /// Descriptor of an engine extension.
    type Plugin: Send + Sync + Debug;
    /// Handle to an open store.
    type Store: StoreHandle;

    /// Installs a plugin. Runs synchronously and must happen before any store is opened.
    ///
    /// # Arguments
    ///
    /// * `plugin` - The plugin descriptor to install
    fn register_plugin(&self, plugin: &Self::Plugin) -> EngineResult<()>;

    /// Opens (or creates) a store.
    ///
    /// # Arguments
    ///
    /// * `name` - The store name
    /// * `adapter` - Storage adapter identifier, e.g. `memory`
    /// * `options` - Adapter-specific connection options, passed through unmodified
    ///
    /// # Returns
    ///
    /// The open store, or an [`EngineError`](crate::error::EngineError) for an unknown adapter
    /// or a failed connection.
    async fn open_store(
        &self,
        name: &str,
        adapter: &str,
        options: &ConnectionOptions,
    ) -> EngineResult<Self::Store>;
}

/// An open document store owning its collections.
#[async_trait]
pub trait StoreHandle: Send + Sync + Debug {
    /// Handle to a collection of this store.
    type Collection: CollectionHandle;

    /// Returns the name the store was opened under.
    fn name(&self) -> &str;

    /// Creates a collection with the given schema.
    ///
    /// # Arguments
    ///
    /// * `name` - The store-level collection name
    /// * `schema` - Opaque schema reference, interpreted only by the engine
    ///
    /// # Returns
    ///
    /// A handle to the new collection, or an [`EngineError`](crate::error::EngineError) if the
    /// schema is rejected or the name conflicts with an existing collection.
    async fn create_collection(&self, name: &str, schema: &Schema) -> EngineResult<Self::Collection>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> EngineResult<Vec<String>>;
}

/// A collection inside an open store.
#[async_trait]
pub trait CollectionHandle: Send + Sync + Debug {
    /// Returns the store-level name of the collection.
    fn name(&self) -> &str;

    /// Binds a hook function under the given kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The lifecycle point the hook runs at
    /// * `hook` - The hook function
    /// * `batch` - Whether the hook applies to bulk operations rather than single documents
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or an [`EngineError`](crate::error::EngineError) if the engine does
    /// not support `kind`.
    async fn bind_hook(&self, kind: HookKind, hook: HookRef, batch: bool) -> EngineResult<()>;
}

#[async_trait]
impl<E> StoreEngine for &E
where
    E: StoreEngine,
{
    type Plugin = E::Plugin;
    type Store = E::Store;

    fn register_plugin(&self, plugin: &Self::Plugin) -> EngineResult<()> {
        (*self).register_plugin(plugin)
    }

    async fn open_store(
        &self,
        name: &str,
        adapter: &str,
        options: &ConnectionOptions,
    ) -> EngineResult<Self::Store> {
        (*self)
            .open_store(name, adapter, options)
            .await
    }
}
