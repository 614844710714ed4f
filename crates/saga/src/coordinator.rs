//! Saga coordinator orchestrating forward execution and rollback.

use std::sync::Arc;
use std::time::Instant;

use crate::context::{FailedStep, SagaContext, SagaResult};
use crate::logging::{SagaLogger, TracingLogger, log_safe};
use crate::policy;
use crate::rollback;
use crate::state::SagaState;
use crate::step::Step;
use crate::types::SagaId;

/// Creates a coordinator with the given logger and saga ID.
pub fn create_saga(logger: Arc<dyn SagaLogger>, saga_id: SagaId) -> SagaCoordinator {
    SagaCoordinator::new(logger, saga_id)
}

/// Orchestrates one saga run: sequential forward execution of steps with
/// reverse-order compensation on failure.
///
/// Steps run strictly in input order; later steps may depend on identifiers
/// produced by earlier ones, so there is no parallelism within a run.
/// Independent coordinators (distinct saga IDs) share no mutable state and
/// may run concurrently.
pub struct SagaCoordinator {
    saga_id: SagaId,
    logger: Arc<dyn SagaLogger>,
    context: SagaContext,
    state: SagaState,
}

impl SagaCoordinator {
    /// Creates a new coordinator.
    pub fn new(logger: Arc<dyn SagaLogger>, saga_id: SagaId) -> Self {
        Self {
            saga_id,
            logger,
            context: SagaContext::new(saga_id),
            state: SagaState::Idle,
        }
    }

    /// Coordinator with a fresh ID and the default tracing logger.
    pub fn with_default_logger() -> Self {
        Self::new(Arc::new(TracingLogger), SagaId::new())
    }

    /// Executes the steps in order, compensating on failure.
    ///
    /// Never returns an error as such: every failure (execution, retry
    /// exhaustion, or timeout) is captured into the returned [`SagaResult`],
    /// so callers never need to guard this call. An empty step list succeeds
    /// trivially with an empty ledger.
    #[tracing::instrument(skip(self, steps), fields(saga_id = %self.saga_id))]
    pub async fn execute(&mut self, steps: &[Step]) -> SagaResult {
        metrics::counter!("saga_executions_total").increment(1);
        let saga_start = Instant::now();

        self.context = SagaContext::new(self.saga_id);
        self.state = SagaState::Running;

        let mut failure = None;
        for step in steps {
            self.logger.step_started(self.saga_id, step.name());
            let step_start = Instant::now();

            match policy::run_step(step).await {
                Ok(result) => {
                    let duration_ms = step_start.elapsed().as_millis() as u64;
                    self.logger.step_completed(
                        self.saga_id,
                        step.name(),
                        duration_ms,
                        &log_safe(&result),
                    );
                    self.context.completed_steps.push(
                        crate::context::CompletedStepRecord {
                            name: step.name().to_string(),
                            result,
                            duration_ms,
                        },
                    );
                }
                Err(err) => {
                    self.logger
                        .step_failed(self.saga_id, step.name(), &err.to_string());
                    self.context.failed_step = Some(FailedStep {
                        name: step.name().to_string(),
                        error: err.to_string(),
                    });
                    failure = Some(err);
                    break;
                }
            }
        }

        let result = match failure {
            None => {
                self.state = SagaState::Succeeded;
                metrics::counter!("saga_completed").increment(1);
                tracing::info!(
                    steps = self.context.completed_steps.len(),
                    "saga completed successfully"
                );
                SagaResult {
                    success: true,
                    context: self.context.clone(),
                    error: None,
                }
            }
            Some(err) => {
                self.state = SagaState::RollingBack;
                rollback::run(steps, &mut self.context, self.logger.as_ref()).await;
                self.state = SagaState::Failed;
                metrics::counter!("saga_failed").increment(1);
                tracing::warn!(error = %err, "saga failed, rollback complete");
                SagaResult {
                    success: false,
                    context: self.context.clone(),
                    error: Some(err),
                }
            }
        };

        metrics::histogram!("saga_duration_seconds").record(saga_start.elapsed().as_secs_f64());
        result
    }

    /// Returns this coordinator's saga ID.
    pub fn saga_id(&self) -> SagaId {
        self.saga_id
    }

    /// Returns the current state of the saga.
    pub fn state(&self) -> SagaState {
        self.state
    }

    /// Returns an immutable snapshot of the execution ledger.
    pub fn context(&self) -> SagaContext {
        self.context.clone()
    }
}
