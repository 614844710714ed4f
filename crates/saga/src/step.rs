//! Saga step definition.
//!
//! A [`Step`] pairs a forward operation with the compensating action that
//! semantically undoes it. Both are opaque async closures supplied by the
//! caller; the coordinator imposes no schema on their payloads beyond
//! "resolves to a JSON value or fails with an error".

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::policy::RetryPolicy;

/// Boxed error type produced by step closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a single execution attempt of a step's forward operation.
pub type StepOutcome = std::result::Result<Value, BoxError>;

type ExecuteFn = Arc<dyn Fn() -> BoxFuture<'static, StepOutcome> + Send + Sync>;
type CompensateFn =
    Arc<dyn Fn(Value) -> BoxFuture<'static, std::result::Result<(), BoxError>> + Send + Sync>;

/// A single saga step: a forward operation plus its compensating action.
///
/// The coordinator never mutates a step. The compensating action receives
/// the value the forward operation completed with, so it can undo by ID
/// (release a reservation, delete a vector point, detach a graph node).
#[derive(Clone)]
pub struct Step {
    name: String,
    execute: ExecuteFn,
    compensate: CompensateFn,
    idempotent: bool,
    retry_policy: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl Step {
    /// Creates a step from a forward operation and its compensation.
    pub fn new<E, EFut, C, CFut>(name: impl Into<String>, execute: E, compensate: C) -> Self
    where
        E: Fn() -> EFut + Send + Sync + 'static,
        EFut: Future<Output = StepOutcome> + Send + 'static,
        C: Fn(Value) -> CFut + Send + Sync + 'static,
        CFut: Future<Output = std::result::Result<(), BoxError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            execute: Arc::new(move || Box::pin(execute())),
            compensate: Arc::new(move |result| Box::pin(compensate(result))),
            idempotent: false,
            retry_policy: None,
            timeout: None,
        }
    }

    /// Sets the retry policy. Steps without one run exactly once.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the timeout guard for this step's (retry-wrapped) execution.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Marks the step as idempotent.
    ///
    /// Informational: carried on the step and visible to callers, but it
    /// does not change execution or retry semantics.
    pub fn idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }

    /// Returns the step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the step is marked idempotent.
    pub fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    /// Returns the retry policy, if configured.
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry_policy.as_ref()
    }

    /// Returns the timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Starts one execution attempt of the forward operation.
    pub(crate) fn invoke(&self) -> BoxFuture<'static, StepOutcome> {
        (self.execute)()
    }

    /// Starts the compensating action with the recorded forward result.
    pub(crate) fn run_compensation(
        &self,
        result: Value,
    ) -> BoxFuture<'static, std::result::Result<(), BoxError>> {
        (self.compensate)(result)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("idempotent", &self.idempotent)
            .field("retry_policy", &self.retry_policy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_invoke_runs_forward_operation() {
        let step = Step::new(
            "store-postgres",
            || async { Ok(json!({"row_id": 42})) },
            |_| async { Ok(()) },
        );

        let value = step.invoke().await.unwrap();
        assert_eq!(value, json!({"row_id": 42}));
    }

    #[tokio::test]
    async fn test_compensation_receives_forward_result() {
        let step = Step::new(
            "store-qdrant",
            || async { Ok(json!({"point_id": "abc"})) },
            |result| async move {
                assert_eq!(result, json!({"point_id": "abc"}));
                Ok(())
            },
        );

        let value = step.invoke().await.unwrap();
        step.run_compensation(value).await.unwrap();
    }

    #[test]
    fn test_builder_defaults() {
        let step = Step::new("noop", || async { Ok(Value::Null) }, |_| async { Ok(()) });
        assert_eq!(step.name(), "noop");
        assert!(!step.is_idempotent());
        assert!(step.retry_policy().is_none());
        assert!(step.timeout().is_none());
    }

    #[test]
    fn test_builder_configuration() {
        let step = Step::new("noop", || async { Ok(Value::Null) }, |_| async { Ok(()) })
            .with_retry_policy(RetryPolicy::fixed(3, Duration::from_millis(50)))
            .with_timeout(Duration::from_secs(5))
            .idempotent(true);

        assert!(step.is_idempotent());
        assert_eq!(step.retry_policy().unwrap().max_attempts(), 3);
        assert_eq!(step.timeout(), Some(Duration::from_secs(5)));
    }
}
