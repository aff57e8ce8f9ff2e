//! Scripted engine and recording logger sharing one journal, so tests can assert on the exact
//! interleaving of engine calls and diagnostic events.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use mainframe_core::{
    collection::Schema,
    diagnostics::{DiagnosticEvent, Logger},
    engine::{CollectionHandle, StoreEngine, StoreHandle},
    error::{EngineError, EngineResult},
    hook::{HookKind, HookRef},
    settings::ConnectionOptions,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    RegisterPlugin(String),
    OpenStore { name: String, adapter: String },
    CreateCollection(String),
    BindHook { collection: String, kind: HookKind, batch: bool },
    Debug(String),
    Info(String),
}

pub type Journal = Arc<Mutex<Vec<Entry>>>;

fn record(journal: &Journal, entry: Entry) {
    journal.lock().unwrap().push(entry);
}

pub fn entries(journal: &Journal) -> Vec<Entry> {
    journal.lock().unwrap().clone()
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    pub journal: Journal,
    pub fail_plugin: Option<String>,
    pub fail_open: Option<EngineError>,
    pub fail_create: Option<String>,
    pub fail_bind: Option<HookKind>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(&self) -> RecordingLogger {
        RecordingLogger {
            journal: self.journal.clone(),
        }
    }

    pub fn entries(&self) -> Vec<Entry> {
        entries(&self.journal)
    }

    pub fn created(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::CreateCollection(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn binds(&self) -> Vec<(String, HookKind, bool)> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::BindHook { collection, kind, batch } => Some((collection, kind, batch)),
                _ => None,
            })
            .collect()
    }

    pub fn opened(&self) -> bool {
        self.entries()
            .iter()
            .any(|entry| matches!(entry, Entry::OpenStore { .. }))
    }
}

#[async_trait]
impl StoreEngine for ScriptedEngine {
    type Plugin = String;
    type Store = ScriptedStore;

    fn register_plugin(&self, plugin: &Self::Plugin) -> EngineResult<()> {
        record(&self.journal, Entry::RegisterPlugin(plugin.clone()));

        if self.fail_plugin.as_deref() == Some(plugin.as_str()) {
            return Err(EngineError::Plugin(plugin.clone()));
        }

        Ok(())
    }

    async fn open_store(
        &self,
        name: &str,
        adapter: &str,
        _options: &ConnectionOptions,
    ) -> EngineResult<Self::Store> {
        record(
            &self.journal,
            Entry::OpenStore {
                name: name.to_string(),
                adapter: adapter.to_string(),
            },
        );

        if let Some(err) = &self.fail_open {
            return Err(err.clone());
        }

        Ok(ScriptedStore {
            name: name.to_string(),
            engine: self.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedStore {
    name: String,
    engine: ScriptedEngine,
}

#[async_trait]
impl StoreHandle for ScriptedStore {
    type Collection = ScriptedCollection;

    fn name(&self) -> &str {
        &self.name
    }

    async fn create_collection(&self, name: &str, _schema: &Schema) -> EngineResult<Self::Collection> {
        record(&self.engine.journal, Entry::CreateCollection(name.to_string()));

        if self.engine.fail_create.as_deref() == Some(name) {
            return Err(EngineError::Backend(format!("cannot create {name}")));
        }

        Ok(ScriptedCollection {
            name: name.to_string(),
            engine: self.engine.clone(),
        })
    }

    async fn list_collections(&self) -> EngineResult<Vec<String>> {
        Ok(self.engine.created())
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedCollection {
    name: String,
    engine: ScriptedEngine,
}

#[async_trait]
impl CollectionHandle for ScriptedCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn bind_hook(&self, kind: HookKind, _hook: HookRef, batch: bool) -> EngineResult<()> {
        record(
            &self.engine.journal,
            Entry::BindHook {
                collection: self.name.clone(),
                kind,
                batch,
            },
        );

        if self.engine.fail_bind == Some(kind) {
            return Err(EngineError::UnsupportedHook(kind));
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RecordingLogger {
    journal: Journal,
}

impl Logger for RecordingLogger {
    fn debug(&self, event: &DiagnosticEvent) {
        record(&self.journal, Entry::Debug(event.trace.to_string()));
    }

    fn info(&self, event: &DiagnosticEvent) {
        record(&self.journal, Entry::Info(event.trace.to_string()));
    }
}
