//! Saga state machine.

use serde::{Deserialize, Serialize};

/// The state of a saga run in its lifecycle.
///
/// State transitions:
/// ```text
/// Idle ──► Running ──┬──► Succeeded
///                    └──► RollingBack ──► Failed
/// ```
///
/// `Succeeded` and `Failed` are terminal. There is no partial terminal
/// state: rollback always runs to completion (or is a no-op when nothing
/// had completed) before a result is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SagaState {
    /// No execution has started yet.
    #[default]
    Idle,

    /// Steps are being executed in order.
    Running,

    /// A step failed and compensations are in progress.
    RollingBack,

    /// All steps completed successfully (terminal state).
    Succeeded,

    /// Rollback finished after a failure (terminal state).
    Failed,
}

impl SagaState {
    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaState::Succeeded | SagaState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Idle => "Idle",
            SagaState::Running => "Running",
            SagaState::RollingBack => "RollingBack",
            SagaState::Succeeded => "Succeeded",
            SagaState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
