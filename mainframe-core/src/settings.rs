//! Connection options and file-based bootstrap settings.
//!
//! [`MainframeSettings`] is the serializable description of a whole bootstrap run: which store
//! to open, with which adapter and options, and the ordered collections to create. It is plain
//! JSON so that deployments can swap the collection set without code changes:
//!
//! ```json
//! {
//!   "storeName": "carddemodb",
//!   "adapter": "memory",
//!   "options": {},
//!   "collections": [
//!     { "name": "student", "schema": { "type": "object" } },
//!     { "name": "receipt", "schema": {}, "hooks": { "preInsert": "stampCreated" } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    bootstrap::{DEFAULT_ADAPTER, DEFAULT_STORE_NAME},
    collection::{CollectionSpec, ConfigList},
    error::ConfigurationError,
    hook::{HookLibrary, HookRegistry},
};

/// Adapter-specific connection options, passed to the engine unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionOptions(Map<String, Value>);

impl ConnectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ConnectionOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_adapter() -> String {
    DEFAULT_ADAPTER.to_string()
}

/// Serializable description of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainframeSettings {
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default = "default_adapter")]
    pub adapter: String,
    #[serde(default)]
    pub options: ConnectionOptions,
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
}

impl Default for MainframeSettings {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            adapter: default_adapter(),
            options: ConnectionOptions::default(),
            collections: Vec::new(),
        }
    }
}

impl MainframeSettings {
    /// Parses settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSettings`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the collection entries into a validated [`ConfigList`], in file order.
    ///
    /// # Errors
    ///
    /// Any error from [`CollectionSpec::resolve`] or [`ConfigList::new`].
    pub fn config_list(
        &self,
        library: &HookLibrary,
        registry: &HookRegistry,
    ) -> Result<ConfigList, ConfigurationError> {
        ConfigList::new(
            self.collections
                .iter()
                .map(|spec| spec.resolve(library, registry))
                .collect::<Result<Vec<_>, _>>()?,
        )
    }
}
