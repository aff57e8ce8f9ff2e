//! Bootstrap coordinator: plugins, store, collections, hooks, strictly in that order.
//!
//! A run goes through the following sequence points, never overlapping:
//!
//! 1. Validate the collection list (no engine contact on failure)
//! 2. Register plugins on the engine
//! 3. Open the store
//! 4. For each collection config, in order: create the collection, then bind its hooks
//!
//! Any failure stops the run and is returned as-is. Collections created before the failure stay
//! in the store; nothing is rolled back.
//!
//! # Example
//!
//! ```ignore
//! use mainframe::prelude::*;
//!
//! let store = Bootstrap::new(&engine)
//!     .store_name("carddemodb")
//!     .logger(TracingLogger)
//!     .run("memory", &ConnectionOptions::default(), configs)
//!     .await?;
//! ```

use std::sync::Arc;

use crate::{
    collection::{CollectionConfig, ConfigList},
    diagnostics::{DiagnosticEvent, Logger, NoopLogger},
    engine::{StoreEngine, StoreHandle},
    error::BootstrapResult,
    hook::{HookBindings, HookRef, HookRegistry, HookLibrary},
    plugin::apply_plugins,
    settings::{ConnectionOptions, MainframeSettings},
};

/// Store name used when none is configured.
pub const DEFAULT_STORE_NAME: &str = "mainframe";

/// Adapter used by settings that do not name one.
pub const DEFAULT_ADAPTER: &str = "memory";

// Hooks are bound for single-document operations only.
const BATCH: bool = false;

/// Configurable bootstrap run against an engine.
///
/// Use `Bootstrap::new(&engine)` to keep ownership of the engine.
#[derive(Debug)]
pub struct Bootstrap<E: StoreEngine> {
    engine: E,
    store_name: String,
    plugins: Vec<E::Plugin>,
    default_hooks: HookBindings,
    registry: HookRegistry,
    logger: Arc<dyn Logger>,
}

impl<E: StoreEngine> Bootstrap<E> {
    /// Creates a run with the default store name, no plugins, no default hooks, the default
    /// hook registry and a [`NoopLogger`].
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            store_name: DEFAULT_STORE_NAME.to_string(),
            plugins: Vec::new(),
            default_hooks: HookBindings::new(),
            registry: HookRegistry::default(),
            logger: Arc::new(NoopLogger),
        }
    }

    pub fn store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    /// Sets the plugins to register, in order.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = E::Plugin>) -> Self {
        self.plugins = plugins.into_iter().collect();
        self
    }

    /// Appends one plugin.
    pub fn plugin(mut self, plugin: E::Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Sets the bindings used for configs that carry no hook bindings of their own.
    pub fn default_hooks(mut self, bindings: HookBindings) -> Self {
        self.default_hooks = bindings;
        self
    }

    /// Adds one default binding.
    pub fn default_hook(mut self, key: impl Into<String>, hook: HookRef) -> Self {
        self.default_hooks.insert(key.into(), hook);
        self
    }

    pub fn hook_registry(mut self, registry: HookRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Runs the bootstrap and returns the open store.
    ///
    /// # Arguments
    ///
    /// * `adapter` - Storage adapter identifier passed to the engine
    /// * `options` - Connection options passed to the engine unmodified
    /// * `configs` - The collections to create, in order
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError`](crate::error::ConfigurationError) for an empty list, an empty
    ///   collection name or an unknown hook kind
    /// - [`EngineError`](crate::error::EngineError) from plugin registration, store open or
    ///   collection creation, unchanged
    /// - [`BootstrapError::HookBinding`](crate::error::BootstrapError::HookBinding) if the
    ///   engine refuses a hook
    pub async fn run<I>(
        &self,
        adapter: &str,
        options: &ConnectionOptions,
        configs: I,
    ) -> BootstrapResult<E::Store>
    where
        I: IntoIterator<Item = CollectionConfig>,
    {
        let configs = ConfigList::new(configs.into_iter().collect())?;

        self.execute(&self.store_name, adapter, options, &configs)
            .await
    }

    /// Runs the bootstrap described by `settings`, resolving named hooks against `library`.
    ///
    /// The settings' store name takes precedence over the one set on the builder.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus [`ConfigurationError::UnknownHook`](crate::error::ConfigurationError::UnknownHook)
    /// for hook names missing from `library`.
    pub async fn run_settings(
        &self,
        settings: &MainframeSettings,
        library: &HookLibrary,
    ) -> BootstrapResult<E::Store> {
        let configs = settings.config_list(library, &self.registry)?;

        self.execute(&settings.store_name, &settings.adapter, &settings.options, &configs)
            .await
    }

    async fn execute(
        &self,
        store_name: &str,
        adapter: &str,
        options: &ConnectionOptions,
        configs: &ConfigList,
    ) -> BootstrapResult<E::Store> {
        apply_plugins(&self.engine, &self.plugins, &*self.logger)?;

        let store = self
            .engine
            .open_store(store_name, adapter, options)
            .await?;

        self.logger.debug(&DiagnosticEvent::new(
            "bootstrap",
            format!("finished initializing the database {store_name} ({adapter})"),
        ));

        initialize_collections(
            &store,
            configs,
            &self.default_hooks,
            &self.registry,
            &*self.logger,
        )
        .await?;

        Ok(store)
    }
}

/// Creates every collection in `configs` on `store`, in order, binding its hooks before moving
/// on to the next one.
///
/// Configs without their own bindings get `default_hooks`.
///
/// # Errors
///
/// Stops at the first failed creation or binding and returns that error. Collections created
/// up to that point are left in place.
pub async fn initialize_collections<S>(
    store: &S,
    configs: &ConfigList,
    default_hooks: &HookBindings,
    registry: &HookRegistry,
    logger: &dyn Logger,
) -> BootstrapResult<()>
where
    S: StoreHandle + ?Sized,
{
    for config in configs {
        let bindings = config
            .hook_bindings()
            .unwrap_or(default_hooks);

        let collection = store
            .create_collection(config.effective_name(), config.schema())
            .await?;

        logger.debug(&DiagnosticEvent::new(
            "initialize_collections",
            format!("added {} collection to the database", config.name()),
        ));

        for (key, hook) in bindings {
            registry
                .bind(&collection, key, hook.clone(), BATCH)
                .await?;
        }
    }

    Ok(())
}

/// Bootstraps a store with the default store name and hook registry.
///
/// `plugins` of `None` behaves like an empty list. See [`Bootstrap::run`] for the sequence and
/// the errors.
pub async fn bootstrap<E, I, L>(
    engine: E,
    adapter: &str,
    options: &ConnectionOptions,
    plugins: Option<Vec<E::Plugin>>,
    configs: I,
    logger: L,
) -> BootstrapResult<E::Store>
where
    E: StoreEngine,
    I: IntoIterator<Item = CollectionConfig>,
    L: Logger + 'static,
{
    Bootstrap::new(engine)
        .plugins(plugins.unwrap_or_default())
        .logger(logger)
        .run(adapter, options, configs)
        .await
}
