//! Declarative collection descriptions.
//!
//! - [`CollectionConfig`] - one collection to create, with its hook functions attached
//! - [`ConfigList`] - the ordered, validated, non-empty list a bootstrap run works through
//! - [`CollectionSpec`] - the serializable form of a config, naming hooks instead of holding them
//! - [`Schema`] - opaque schema reference handed to the engine unmodified
//!
//! # Example
//!
//! ```ignore
//! use mainframe_core::collection::{CollectionConfig, ConfigList, Schema};
//! use serde_json::json;
//!
//! let configs = ConfigList::new(vec![
//!     CollectionConfig::new("students", Schema::new(json!({ "type": "object" }))),
//!     CollectionConfig::new("academicSettings", Schema::default()).alias("academicsettings"),
//! ])?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{
    error::ConfigurationError,
    hook::{HookBindings, HookLibrary, HookRef, HookRegistry},
};

/// Schema reference attached to a collection.
///
/// The bootstrap core never looks inside; only the engine interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Description of one collection to create during bootstrap.
///
/// `hook_bindings` distinguishes "not given" (`None`, the run's default bindings apply) from
/// "given but empty" (no hooks at all).
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    name: String,
    collection_alias: Option<String>,
    schema: Schema,
    hook_bindings: Option<HookBindings>,
}

impl CollectionConfig {
    /// Creates a config with no alias and no hook bindings of its own.
    pub fn new(name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            collection_alias: None,
            schema: schema.into(),
            hook_bindings: None,
        }
    }

    /// Sets the store-level collection name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.collection_alias = Some(alias.into());
        self
    }

    /// Adds one hook binding under a hook-kind identifier.
    pub fn hook(mut self, key: impl Into<String>, hook: HookRef) -> Self {
        self.hook_bindings
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), hook);
        self
    }

    /// Replaces the hook bindings. An empty map disables the run's default bindings.
    pub fn hooks(mut self, bindings: HookBindings) -> Self {
        self.hook_bindings = Some(bindings);
        self
    }

    /// Returns the logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection_alias(&self) -> Option<&str> {
        self.collection_alias.as_deref()
    }

    /// Returns the name the collection is created under: the alias if set and non-empty, else
    /// the name.
    pub fn effective_name(&self) -> &str {
        self.collection_alias
            .as_deref()
            .filter(|alias| !alias.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn hook_bindings(&self) -> Option<&HookBindings> {
        self.hook_bindings.as_ref()
    }
}

/// Ordered, non-empty list of collection configs.
///
/// Construction is the validation step: an empty list or a config with an empty name is a
/// [`ConfigurationError`].
#[derive(Debug, Clone)]
pub struct ConfigList(Vec<CollectionConfig>);

impl ConfigList {
    /// Validates and wraps a list of configs, preserving order.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::EmptyConfigList`] if `configs` is empty
    /// - [`ConfigurationError::EmptyCollectionName`] with the zero-based position of the first
    ///   config whose name is empty
    pub fn new(configs: Vec<CollectionConfig>) -> Result<Self, ConfigurationError> {
        if configs.is_empty() {
            return Err(ConfigurationError::EmptyConfigList);
        }

        if let Some(position) = configs.iter().position(|config| config.name.is_empty()) {
            return Err(ConfigurationError::EmptyCollectionName(position));
        }

        Ok(Self(configs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectionConfig> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<CollectionConfig> {
        self.0
    }
}

impl IntoIterator for ConfigList {
    type Item = CollectionConfig;
    type IntoIter = std::vec::IntoIter<CollectionConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigList {
    type Item = &'a CollectionConfig;
    type IntoIter = std::slice::Iter<'a, CollectionConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Serializable collection entry, as found in settings files.
///
/// Hooks are referenced by name (`kind identifier -> hook name`) and resolved against a
/// [`HookLibrary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<BTreeMap<String, String>>,
}

impl CollectionSpec {
    /// Turns this entry into a [`CollectionConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownHookKind`] for a kind identifier `registry` does not know
    /// - [`ConfigurationError::UnknownHook`] for a hook name missing from `library`
    pub fn resolve(
        &self,
        library: &HookLibrary,
        registry: &HookRegistry,
    ) -> Result<CollectionConfig, ConfigurationError> {
        let mut config = CollectionConfig::new(self.name.clone(), self.schema.clone());

        if let Some(alias) = &self.collection {
            config = config.alias(alias.clone());
        }

        if let Some(hooks) = &self.hooks {
            let bindings = hooks
                .iter()
                .map(|(kind, hook_name)| {
                    registry.resolve(kind)?;

                    library
                        .get(hook_name)
                        .map(|hook| (kind.clone(), hook))
                        .ok_or_else(|| {
                            ConfigurationError::UnknownHook(hook_name.clone(), self.name.clone())
                        })
                })
                .collect::<Result<HookBindings, ConfigurationError>>()?;

            config = config.hooks(bindings);
        }

        Ok(config)
    }
}
