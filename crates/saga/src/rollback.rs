//! Best-effort reverse-order compensation of completed steps.

use crate::context::{RollbackResult, SagaContext};
use crate::logging::SagaLogger;
use crate::step::Step;

/// Compensates every completed step, last first.
///
/// Each compensation is independently caught: a failure is recorded in the
/// ledger but never stops the loop, so every completed step gets exactly
/// one compensation attempt. Compensations are never retried.
pub(crate) async fn run(steps: &[Step], context: &mut SagaContext, logger: &dyn SagaLogger) {
    let completed = context.completed_steps.clone();

    // Completed records are exactly the prefix of `steps`, in order, so
    // pair positionally. Names are not required to be unique.
    for (step, record) in steps.iter().zip(completed.iter()).rev() {
        let outcome = step.run_compensation(record.result.clone()).await;
        let result = match outcome {
            Ok(()) => RollbackResult {
                step_name: record.name.clone(),
                success: true,
                error: None,
            },
            Err(err) => RollbackResult {
                step_name: record.name.clone(),
                success: false,
                error: Some(err.to_string()),
            },
        };

        logger.rollback_attempted(
            context.saga_id,
            &result.step_name,
            result.success,
            result.error.as_deref(),
        );
        context.rollback_results.push(result);
    }
}
