//! Diagnostics sink for bootstrap progress events.
//!
//! The coordinator reports progress through a [`Logger`] handed to it by the caller; it never
//! reaches for a global logger. Failures are not logged here, they are returned as errors.
//!
//! Two sinks ship with the crate:
//!
//! - [`NoopLogger`] drops every event
//! - [`TracingLogger`] forwards events to `tracing`, with `trace` and `module` as fields

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fmt::Debug, sync::Arc};

/// Module identifier attached to every event emitted by the bootstrap core.
pub const MODULE: &str = "EmbeddedDatabase";

/// A structured progress record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEvent {
    pub message: String,
    /// Name of the operation that emitted the event.
    pub trace: &'static str,
    pub module: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl DiagnosticEvent {
    pub fn new(trace: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace,
            module: MODULE,
            timestamp: Utc::now(),
        }
    }
}

/// Receiver of diagnostic events.
pub trait Logger: Send + Sync + Debug {
    fn debug(&self, event: &DiagnosticEvent);
    fn info(&self, event: &DiagnosticEvent);
}

impl<L> Logger for Arc<L>
where
    L: Logger + ?Sized,
{
    fn debug(&self, event: &DiagnosticEvent) {
        (**self).debug(event)
    }

    fn info(&self, event: &DiagnosticEvent) {
        (**self).info(event)
    }
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _event: &DiagnosticEvent) {}

    fn info(&self, _event: &DiagnosticEvent) {}
}

/// Forwards events to the `tracing` subscriber installed by the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, event: &DiagnosticEvent) {
        tracing::debug!(
            trace = event.trace,
            module = event.module,
            timestamp = %event.timestamp,
            "{}",
            event.message
        );
    }

    fn info(&self, event: &DiagnosticEvent) {
        tracing::info!(
            trace = event.trace,
            module = event.module,
            timestamp = %event.timestamp,
            "{}",
            event.message
        );
    }
}
