//! The application's standard store: name, collection set and middleware.
//!
//! The collection set is configuration data ([`DEFAULT_SETTINGS`], a JSON document embedded in
//! the crate), not code. Deployments that need a different set can parse their own settings
//! and call [`Bootstrap::run_settings`](mainframe_core::bootstrap::Bootstrap::run_settings)
//! instead of [`mainframe`].

use bson::DateTime;
use chrono::Utc;

use mainframe_core::{
    bootstrap::Bootstrap,
    collection::ConfigList,
    diagnostics::Logger,
    engine::StoreEngine,
    error::{BootstrapResult, ConfigurationError, EngineError},
    hook::{HookBindings, HookKind, HookLibrary, HookRegistry, hook_fn},
    settings::{ConnectionOptions, MainframeSettings},
};

/// Name of the application's store.
pub const DB_NAME: &str = "carddemodb";

/// Standard settings: store name, adapter and the ordered collection set.
pub const DEFAULT_SETTINGS: &str = include_str!("collections.json");

/// Parses [`DEFAULT_SETTINGS`].
pub fn default_settings() -> Result<MainframeSettings, ConfigurationError> {
    MainframeSettings::from_json(DEFAULT_SETTINGS)
}

/// Named hooks available to settings files.
///
/// - `stampCreated` sets `createdAt` and `updatedAt` to the current time
/// - `stampUpdated` sets `updatedAt` to the current time
/// - `forbidRemove` rejects the operation
pub fn standard_hooks() -> HookLibrary {
    HookLibrary::new()
        .with(
            "stampCreated",
            hook_fn(|doc| {
                let now = DateTime::from_chrono(Utc::now());
                doc.insert("createdAt", now);
                doc.insert("updatedAt", now);
                Ok(())
            }),
        )
        .with(
            "stampUpdated",
            hook_fn(|doc| {
                doc.insert("updatedAt", DateTime::from_chrono(Utc::now()));
                Ok(())
            }),
        )
        .with(
            "forbidRemove",
            hook_fn(|_doc| {
                Err(EngineError::HookRejected(
                    HookKind::PreRemove,
                    "documents in this collection cannot be removed".to_string(),
                ))
            }),
        )
}

/// Middleware applied to collections whose settings entry declares no hooks.
pub fn default_hook_bindings() -> HookBindings {
    let library = standard_hooks();

    [
        (HookKind::PreInsert, "stampCreated"),
        (HookKind::PreSave, "stampUpdated"),
    ]
    .into_iter()
    .filter_map(|(kind, name)| {
        library
            .get(name)
            .map(|hook| (kind.name().to_string(), hook))
    })
    .collect()
}

/// The standard collection set, resolved against [`standard_hooks`].
pub fn default_config_list() -> Result<ConfigList, ConfigurationError> {
    default_settings()?.config_list(&standard_hooks(), &HookRegistry::default())
}

/// Bootstraps the application's standard store ([`DB_NAME`]) with the standard collection set
/// and default middleware.
///
/// # Errors
///
/// See [`Bootstrap::run`].
pub async fn mainframe<E, L>(
    engine: E,
    adapter: &str,
    options: &ConnectionOptions,
    plugins: Option<Vec<E::Plugin>>,
    logger: L,
) -> BootstrapResult<E::Store>
where
    E: StoreEngine,
    L: Logger + 'static,
{
    let configs = default_config_list()?;

    Bootstrap::new(engine)
        .store_name(DB_NAME)
        .plugins(plugins.unwrap_or_default())
        .default_hooks(default_hook_bindings())
        .logger(logger)
        .run(adapter, options, configs)
        .await
}
