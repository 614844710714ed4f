//! Injected logging interface and log-safe payload truncation.
//!
//! The coordinator takes a [`SagaLogger`] at construction instead of
//! reaching for a module-level singleton. [`TracingLogger`] is the default
//! implementation, emitting structured `tracing` events.

use serde_json::{Value, json};

use crate::types::SagaId;

/// Field count above which an object payload is summarized before logging.
const MAX_LOGGED_FIELDS: usize = 5;

/// Structured logging contract for saga execution events.
pub trait SagaLogger: Send + Sync {
    /// A step's forward operation is about to run.
    fn step_started(&self, saga_id: SagaId, step: &str);

    /// A step's forward operation succeeded. `result` is already log-safe.
    fn step_completed(&self, saga_id: SagaId, step: &str, duration_ms: u64, result: &Value);

    /// A step failed terminally (execution, retries exhausted, or timeout).
    fn step_failed(&self, saga_id: SagaId, step: &str, error: &str);

    /// A compensation was attempted for a completed step.
    fn rollback_attempted(&self, saga_id: SagaId, step: &str, success: bool, error: Option<&str>);
}

/// [`SagaLogger`] backed by the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SagaLogger for TracingLogger {
    fn step_started(&self, saga_id: SagaId, step: &str) {
        tracing::info!(%saga_id, step, "saga step started");
    }

    fn step_completed(&self, saga_id: SagaId, step: &str, duration_ms: u64, result: &Value) {
        tracing::info!(%saga_id, step, duration_ms, result = %result, "saga step completed");
    }

    fn step_failed(&self, saga_id: SagaId, step: &str, error: &str) {
        tracing::warn!(%saga_id, step, error, "saga step failed");
    }

    fn rollback_attempted(&self, saga_id: SagaId, step: &str, success: bool, error: Option<&str>) {
        if success {
            tracing::info!(%saga_id, step, "rollback attempted");
        } else {
            tracing::warn!(%saga_id, step, error = error.unwrap_or("unknown"), "rollback attempted");
        }
    }
}

/// Returns a log-safe rendition of a step result.
///
/// Objects with more than `MAX_LOGGED_FIELDS` fields are reduced to a
/// field count and key list. The ledger always keeps the full value; this
/// applies to log output only.
pub fn log_safe(value: &Value) -> Value {
    match value {
        Value::Object(map) if map.len() > MAX_LOGGED_FIELDS => json!({
            "summary": format!("object with {} fields", map.len()),
            "fields": map.keys().cloned().collect::<Vec<_>>(),
        }),
        other => other.clone(),
    }
}
