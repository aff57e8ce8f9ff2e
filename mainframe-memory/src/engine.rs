//! In-memory engine: the `memory` adapter and its plugins.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use mainframe_core::{
    engine::StoreEngine,
    error::{EngineError, EngineResult},
    settings::ConnectionOptions,
};

use crate::store::InMemoryStore;

/// Adapter identifier served by [`InMemoryEngine`].
pub const MEMORY_ADAPTER: &str = "memory";

/// Extensions the in-memory engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InMemoryPlugin {
    /// Rejects collection schemas that are not JSON objects.
    SchemaCheck,
    /// Enables the `postCreate` hook kind.
    LifecycleHooks,
}

/// Engine-wide switches flipped by plugins and read by every store and collection.
#[derive(Debug, Default)]
pub(crate) struct Capabilities {
    schema_check: AtomicBool,
    lifecycle_hooks: AtomicBool,
}

impl Capabilities {
    pub(crate) fn schema_check(&self) -> bool {
        self.schema_check.load(Ordering::Acquire)
    }

    pub(crate) fn lifecycle_hooks(&self) -> bool {
        self.lifecycle_hooks.load(Ordering::Acquire)
    }
}

/// Document-store engine keeping everything in process memory.
///
/// Cloning is cheap and clones share state. Stores opened under the same name share their
/// collections, so a caller can inspect what a failed bootstrap left behind by reopening the
/// store.
///
/// # Example
///
/// ```ignore
/// use mainframe_memory::{InMemoryEngine, InMemoryPlugin};
/// use mainframe_core::{engine::StoreEngine, settings::ConnectionOptions};
///
/// let engine = InMemoryEngine::new();
/// engine.register_plugin(&InMemoryPlugin::SchemaCheck)?;
///
/// let store = engine
///     .open_store("carddemodb", "memory", &ConnectionOptions::default())
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    stores: Arc<RwLock<HashMap<String, InMemoryStore>>>,
    capabilities: Arc<Capabilities>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store opened under `name`, if any.
    pub async fn store(&self, name: &str) -> Option<InMemoryStore> {
        self.stores
            .read()
            .await
            .get(name)
            .cloned()
    }
}

#[async_trait]
impl StoreEngine for InMemoryEngine {
    type Plugin = InMemoryPlugin;
    type Store = InMemoryStore;

    fn register_plugin(&self, plugin: &Self::Plugin) -> EngineResult<()> {
        let flag = match plugin {
            InMemoryPlugin::SchemaCheck => &self.capabilities.schema_check,
            InMemoryPlugin::LifecycleHooks => &self.capabilities.lifecycle_hooks,
        };
        flag.store(true, Ordering::Release);

        tracing::debug!(?plugin, "registered in-memory engine plugin");

        Ok(())
    }

    async fn open_store(
        &self,
        name: &str,
        adapter: &str,
        options: &ConnectionOptions,
    ) -> EngineResult<Self::Store> {
        if adapter != MEMORY_ADAPTER {
            return Err(EngineError::UnknownAdapter(adapter.to_string()));
        }

        if !options.is_empty() {
            tracing::debug!(store = name, "in-memory adapter ignores connection options");
        }

        Ok(
            self.stores
                .write()
                .await
                .entry(name.to_string())
                .or_insert_with(|| InMemoryStore::new(name, self.capabilities.clone()))
                .clone()
        )
    }
}
