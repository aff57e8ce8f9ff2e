//! Applies engine plugins ahead of opening a store.

use crate::{
    diagnostics::{DiagnosticEvent, Logger},
    engine::StoreEngine,
    error::EngineResult,
};

/// Registers `plugins` on `engine` in list order.
///
/// A later plugin may rely on something an earlier one installed, so order is preserved and
/// the first failure stops the run. The "plugins applied" info event is emitted exactly once
/// when every plugin (possibly none) has been registered; it is not emitted on failure.
///
/// # Errors
///
/// Returns the engine's error for the first plugin that fails to register.
pub fn apply_plugins<E>(engine: &E, plugins: &[E::Plugin], logger: &dyn Logger) -> EngineResult<()>
where
    E: StoreEngine + ?Sized,
{
    plugins
        .iter()
        .try_for_each(|plugin| engine.register_plugin(plugin))?;

    logger.info(&DiagnosticEvent::new(
        "apply_plugins",
        format!("setup:::mainframe: initialized {} engine plugins", plugins.len()),
    ));

    Ok(())
}
