//! In-memory stores and collections.
//!
//! Collections keep documents as BSON in a `HashMap` behind async-aware read-write locks and
//! run bound hooks around `insert`, `save` and `remove`.

use async_trait::async_trait;
use bson::{Document as BsonDocument, Uuid};
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};

use mainframe_core::{
    collection::Schema,
    engine::{CollectionHandle, StoreHandle},
    error::{EngineError, EngineResult},
    hook::{HookKind, HookRef},
};

use crate::engine::Capabilities;

type DocumentMap = HashMap<String, BsonDocument>;
type HookMap = HashMap<HookKind, Vec<HookRef>>;

/// An open in-memory store.
///
/// Clones share the same collections.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    name: String,
    /// Collections in creation order.
    collections: Arc<RwLock<Vec<InMemoryCollection>>>,
    capabilities: Arc<Capabilities>,
}

impl InMemoryStore {
    pub(crate) fn new(name: &str, capabilities: Arc<Capabilities>) -> Self {
        Self {
            name: name.to_string(),
            collections: Arc::new(RwLock::new(Vec::new())),
            capabilities,
        }
    }

    /// Returns the collection created under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CollectionNotFound`] if no collection of that name was created.
    pub async fn collection(&self, name: &str) -> EngineResult<InMemoryCollection> {
        self.collections
            .read()
            .await
            .iter()
            .find(|collection| collection.name == name)
            .cloned()
            .ok_or_else(|| EngineError::CollectionNotFound(name.to_string()))
    }
}

#[async_trait]
impl StoreHandle for InMemoryStore {
    type Collection = InMemoryCollection;

    fn name(&self) -> &str {
        &self.name
    }

    async fn create_collection(&self, name: &str, schema: &Schema) -> EngineResult<Self::Collection> {
        let mut collections = self.collections.write().await;

        if collections.iter().any(|collection| collection.name == name) {
            return Err(EngineError::CollectionExists(name.to_string()));
        }

        if self.capabilities.schema_check() && !schema.as_value().is_object() {
            return Err(EngineError::InvalidSchema(
                name.to_string(),
                "schema must be a JSON object".to_string(),
            ));
        }

        let collection = InMemoryCollection::new(name, schema.clone(), self.capabilities.clone());
        collections.push(collection.clone());

        Ok(collection)
    }

    async fn list_collections(&self) -> EngineResult<Vec<String>> {
        Ok(
            self.collections
                .read()
                .await
                .iter()
                .map(|collection| collection.name.clone())
                .collect()
        )
    }
}

/// A collection of an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryCollection {
    name: String,
    schema: Schema,
    documents: Arc<RwLock<DocumentMap>>,
    hooks: Arc<RwLock<HookMap>>,
    capabilities: Arc<Capabilities>,
}

impl InMemoryCollection {
    fn new(name: &str, schema: Schema, capabilities: Arc<Capabilities>) -> Self {
        Self {
            name: name.to_string(),
            schema,
            documents: Arc::new(RwLock::new(DocumentMap::new())),
            hooks: Arc::new(RwLock::new(HookMap::new())),
            capabilities,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of hooks bound under `kind`.
    pub async fn hook_count(&self, kind: HookKind) -> usize {
        self.hooks
            .read()
            .await
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Inserts a new document and returns its generated id.
    ///
    /// Runs `preInsert` hooks on the document before storing it, then `postInsert` and
    /// `postCreate` hooks on a copy of the stored document. If a post hook fails the document
    /// is taken out again, so a failed insert never leaves anything behind.
    pub async fn insert(&self, mut document: BsonDocument) -> EngineResult<Uuid> {
        self.run_hooks(HookKind::PreInsert, &mut document).await?;

        let id = Uuid::new();
        let key = id.to_string();
        self.documents
            .write()
            .await
            .insert(key.clone(), document.clone());

        if let Err(err) = self.run_post_insert_hooks(&mut document).await {
            self.documents.write().await.remove(&key);
            return Err(err);
        }

        Ok(id)
    }

    /// Replaces an existing document, running `preSave` and `postSave` hooks around the write.
    ///
    /// The write only lands if the document still exists once the `preSave` hooks are done.
    pub async fn save(&self, id: Uuid, mut document: BsonDocument) -> EngineResult<()> {
        let key = id.to_string();

        if !self.documents.read().await.contains_key(&key) {
            return Err(EngineError::DocumentNotFound(key, self.name.clone()));
        }

        self.run_hooks(HookKind::PreSave, &mut document).await?;

        match self.documents.write().await.get_mut(&key) {
            Some(stored) => *stored = document.clone(),
            None => return Err(EngineError::DocumentNotFound(key, self.name.clone())),
        }

        self.run_hooks(HookKind::PostSave, &mut document).await
    }

    /// Removes a document, running `preRemove` and `postRemove` hooks on it.
    pub async fn remove(&self, id: Uuid) -> EngineResult<()> {
        let key = id.to_string();

        let mut document = match self.get(id).await {
            Some(document) => document,
            None => return Err(EngineError::DocumentNotFound(key, self.name.clone())),
        };

        self.run_hooks(HookKind::PreRemove, &mut document).await?;

        if self.documents.write().await.remove(&key).is_none() {
            return Err(EngineError::DocumentNotFound(key, self.name.clone()));
        }

        self.run_hooks(HookKind::PostRemove, &mut document).await
    }

    pub async fn get(&self, id: Uuid) -> Option<BsonDocument> {
        self.documents
            .read()
            .await
            .get(&id.to_string())
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    async fn run_post_insert_hooks(&self, document: &mut BsonDocument) -> EngineResult<()> {
        self.run_hooks(HookKind::PostInsert, document).await?;
        self.run_hooks(HookKind::PostCreate, document).await
    }

    async fn run_hooks(&self, kind: HookKind, document: &mut BsonDocument) -> EngineResult<()> {
        // Snapshot so no lock is held while hooks run.
        let hooks = self
            .hooks
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        for hook in hooks {
            hook.call(document).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl CollectionHandle for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn bind_hook(&self, kind: HookKind, hook: HookRef, batch: bool) -> EngineResult<()> {
        if kind == HookKind::PostCreate && !self.capabilities.lifecycle_hooks() {
            return Err(EngineError::UnsupportedHook(kind));
        }

        tracing::debug!(collection = %self.name, %kind, batch, "bound hook");

        self.hooks
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(hook);

        Ok(())
    }
}
