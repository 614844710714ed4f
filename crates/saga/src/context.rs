//! The execution ledger for a single saga run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SagaError;
use crate::types::SagaId;

/// Record of a step whose forward operation succeeded (after any retries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedStepRecord {
    /// The step name.
    pub name: String,
    /// The full value the forward operation completed with. Never
    /// truncated here; log-safe summarization is a logging concern.
    pub result: Value,
    /// Wall-clock duration of the step, retries included.
    pub duration_ms: u64,
}

/// Outcome of one compensation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackResult {
    /// The step whose compensation was attempted.
    pub step_name: String,
    /// Whether the compensation completed without error.
    pub success: bool,
    /// Error message if the compensation failed.
    pub error: Option<String>,
}

/// The step that stopped the forward pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedStep {
    /// The step name.
    pub name: String,
    /// Error message describing the failure.
    pub error: String,
}

/// Append-only ledger of one saga run.
///
/// Mutated only by the coordinator during a single `execute` call; callers
/// receive immutable snapshots. Entries in `rollback_results` appear in the
/// order compensations were invoked, the exact reverse of `completed_steps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaContext {
    /// Identifier of this saga run.
    pub saga_id: SagaId,
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// Steps whose forward operation succeeded, in execution order.
    pub completed_steps: Vec<CompletedStepRecord>,
    /// The step that stopped the forward pass, if any.
    pub failed_step: Option<FailedStep>,
    /// One entry per compensation attempt.
    pub rollback_results: Vec<RollbackResult>,
}

impl SagaContext {
    /// Creates an empty ledger for the given saga run.
    pub fn new(saga_id: SagaId) -> Self {
        Self {
            saga_id,
            start_time: Utc::now(),
            completed_steps: Vec::new(),
            failed_step: None,
            rollback_results: Vec::new(),
        }
    }
}

/// Terminal outcome of one `execute` call.
#[derive(Debug)]
pub struct SagaResult {
    /// True if every step completed.
    pub success: bool,
    /// The full execution ledger.
    pub context: SagaContext,
    /// The forward-pass failure, if any. Compensation failures never
    /// override this; they live in `context.rollback_results`.
    pub error: Option<SagaError>,
}
