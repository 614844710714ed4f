//! Saga error types.

use thiserror::Error;

/// Errors that terminate a saga's forward pass.
///
/// None of these escape [`execute`](crate::SagaCoordinator::execute) as an
/// `Err`: they are captured into the returned
/// [`SagaResult`](crate::SagaResult) and the ledger's `failed_step`.
/// Compensation failures are a separate, strictly local category recorded
/// per-entry in `rollback_results`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SagaError {
    /// The step's own logic failed.
    #[error("step '{step}' failed: {reason}")]
    StepExecution { step: String, reason: String },

    /// The timeout guard elapsed before the step finished.
    #[error("step '{step}' timeout after {timeout_ms}ms")]
    StepTimeout { step: String, timeout_ms: u64 },

    /// Every configured retry attempt failed.
    #[error("step '{step}' failed after {attempts} attempts: {reason}")]
    RetriesExhausted {
        step: String,
        attempts: u32,
        reason: String,
    },
}

impl SagaError {
    /// Returns the name of the step that produced this error.
    pub fn step_name(&self) -> &str {
        match self {
            SagaError::StepExecution { step, .. } => step,
            SagaError::StepTimeout { step, .. } => step,
            SagaError::RetriesExhausted { step, .. } => step,
        }
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;
