//! Saga pattern coordinator for multi-store writes.
//!
//! Executes a sequence of interdependent operations against
//! independently-failing backing stores (a relational store, a vector
//! index, a graph store) and guarantees that, on any step's failure, all
//! previously-completed steps are undone via explicit compensating actions
//! in strict reverse order. Each step runs under retry-with-backoff and a
//! per-step timeout guard; a fully inspectable ledger records what ran,
//! what failed, and what was rolled back.
//!
//! This is an in-process library: step bodies are opaque caller-supplied
//! async closures, and the coordinator provides no distributed consensus
//! and no exactly-once guarantee for side effects it cannot observe.
//! Compensations are assumed idempotent and are never retried.

pub mod context;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod policy;
mod rollback;
pub mod state;
pub mod step;
pub mod types;

pub use context::{CompletedStepRecord, FailedStep, RollbackResult, SagaContext, SagaResult};
pub use coordinator::{SagaCoordinator, create_saga};
pub use error::SagaError;
pub use logging::{SagaLogger, TracingLogger, log_safe};
pub use policy::{BackoffStrategy, RetryPolicy};
pub use state::SagaState;
pub use step::{BoxError, Step, StepOutcome};
pub use types::SagaId;
