//! Hook (middleware) kinds, hook functions and the registry that binds them to collections.
//!
//! Engines invoke hooks around document operations on a collection. A hook is bound under a
//! [`HookKind`]; configuration refers to kinds by string identifier, and the [`HookRegistry`]
//! is the only place those identifiers are turned into kinds. Identifiers it does not know are
//! rejected with [`ConfigurationError::UnknownHookKind`] before the engine is called.
//!
//! # Example
//!
//! ```ignore
//! use mainframe_core::hook::{hook_fn, HookKind, HookRegistry};
//!
//! let registry = HookRegistry::default().with_alias("onSave", HookKind::PreSave);
//! let stamp = hook_fn(|doc| {
//!     doc.insert("updatedAt", bson::DateTime::now());
//!     Ok(())
//! });
//!
//! registry.bind(&collection, "onSave", stamp, false).await?;
//! ```

use async_trait::async_trait;
use bson::Document as BsonDocument;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug, Display},
    sync::Arc,
};

use crate::{
    engine::CollectionHandle,
    error::{BootstrapError, BootstrapResult, ConfigurationError, EngineResult},
};

/// The document lifecycle points an engine can run hooks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookKind {
    PreInsert,
    PostInsert,
    PreSave,
    PostSave,
    PreRemove,
    PostRemove,
    PostCreate,
}

impl HookKind {
    /// Every hook kind, in lifecycle order.
    pub const ALL: [HookKind; 7] = [
        HookKind::PreInsert,
        HookKind::PostInsert,
        HookKind::PreSave,
        HookKind::PostSave,
        HookKind::PreRemove,
        HookKind::PostRemove,
        HookKind::PostCreate,
    ];

    /// The canonical identifier used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::PreInsert => "preInsert",
            HookKind::PostInsert => "postInsert",
            HookKind::PreSave => "preSave",
            HookKind::PostSave => "postSave",
            HookKind::PreRemove => "preRemove",
            HookKind::PostRemove => "postRemove",
            HookKind::PostCreate => "postCreate",
        }
    }
}

impl Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function the engine runs around a document operation.
///
/// The hook receives the document being operated on and may modify it. Returning an error
/// aborts the operation.
#[async_trait]
pub trait Hook: Send + Sync + Debug {
    async fn call(&self, document: &mut BsonDocument) -> EngineResult<()>;
}

/// Shared reference to a hook function.
pub type HookRef = Arc<dyn Hook>;

/// Hook bindings of one collection: hook-kind identifier -> hook function.
pub type HookBindings = BTreeMap<String, HookRef>;

/// Adapts a plain closure into a [`Hook`].
pub struct FnHook<F> {
    func: F,
}

impl<F> Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> Hook for FnHook<F>
where
    F: Fn(&mut BsonDocument) -> EngineResult<()> + Send + Sync,
{
    async fn call(&self, document: &mut BsonDocument) -> EngineResult<()> {
        (self.func)(document)
    }
}

/// Wraps a closure as a shareable hook.
pub fn hook_fn<F>(func: F) -> HookRef
where
    F: Fn(&mut BsonDocument) -> EngineResult<()> + Send + Sync + 'static,
{
    Arc::new(FnHook { func })
}

/// Dispatch table from hook-kind identifiers to [`HookKind`]s.
///
/// The default registry knows the canonical name of every kind. Applications may add aliases
/// before a run, but the set of kinds itself is closed.
#[derive(Debug, Clone)]
pub struct HookRegistry {
    kinds: HashMap<String, HookKind>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self {
            kinds: HookKind::ALL
                .iter()
                .map(|kind| (kind.name().to_string(), *kind))
                .collect(),
        }
    }
}

impl HookRegistry {
    /// Creates a registry that knows the canonical identifier of every [`HookKind`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an additional identifier for an existing hook kind.
    pub fn register_alias(&mut self, alias: impl Into<String>, kind: HookKind) {
        self.kinds.insert(alias.into(), kind);
    }

    /// Builder-style variant of [`register_alias`](Self::register_alias).
    pub fn with_alias(mut self, alias: impl Into<String>, kind: HookKind) -> Self {
        self.register_alias(alias, kind);
        self
    }

    /// Looks up the hook kind for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownHookKind`] naming the identifier if it is not known.
    pub fn resolve(&self, key: &str) -> Result<HookKind, ConfigurationError> {
        self.kinds
            .get(key)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownHookKind(key.to_string()))
    }

    /// Returns `true` if `key` resolves to a hook kind, either canonically or as an alias.
    pub fn contains(&self, key: &str) -> bool {
        self.kinds.contains_key(key)
    }

    /// Lists all known identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = self.kinds.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Binds `hook` to `collection` under the kind named by `key`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownHookKind`] if `key` is not known. The engine is not called.
    /// - [`BootstrapError::HookBinding`] wrapping the engine's error if the binding fails.
    pub async fn bind<C>(
        &self,
        collection: &C,
        key: &str,
        hook: HookRef,
        batch: bool,
    ) -> BootstrapResult<()>
    where
        C: CollectionHandle + ?Sized,
    {
        let kind = self.resolve(key)?;

        collection
            .bind_hook(kind, hook, batch)
            .await
            .map_err(|source| BootstrapError::HookBinding {
                collection: collection.name().to_string(),
                kind,
                source,
            })
    }
}

/// Named hook functions that declarative configuration can refer to.
///
/// # Example
///
/// ```ignore
/// use mainframe_core::hook::{hook_fn, HookLibrary};
///
/// let library = HookLibrary::new().with("stampCreated", hook_fn(|doc| {
///     doc.insert("createdAt", bson::DateTime::now());
///     Ok(())
/// }));
///
/// assert!(library.get("stampCreated").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HookLibrary {
    hooks: HashMap<String, HookRef>,
}

impl HookLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook under a name, replacing any previous hook of that name.
    pub fn register(&mut self, name: impl Into<String>, hook: HookRef) {
        self.hooks.insert(name.into(), hook);
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, hook: HookRef) -> Self {
        self.register(name, hook);
        self
    }

    /// Returns a shared handle to the hook registered under `name`.
    pub fn get(&self, name: &str) -> Option<HookRef> {
        self.hooks.get(name).cloned()
    }

    /// Number of named hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
