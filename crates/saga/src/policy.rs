//! Retry and timeout wrappers applied around a step's execution.
//!
//! The retry wrapper runs first, so a configured timeout bounds the whole
//! retry loop, delays included. The saga default is a fixed delay between
//! attempts; exponential growth is available for callers that want it, but
//! is deliberately not the default here.

use std::time::Duration;

use serde_json::Value;

use crate::error::SagaError;
use crate::step::Step;

/// Delay strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffStrategy {
    /// The same delay before every retry.
    Fixed(Duration),

    /// Delay multiplied by `multiplier` after each failed attempt.
    Exponential { initial: Duration, multiplier: f64 },
}

impl BackoffStrategy {
    /// Returns the delay to wait after the given failed attempt
    /// (attempts are numbered from 1).
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            BackoffStrategy::Fixed(delay) => delay,
            BackoffStrategy::Exponential {
                initial,
                multiplier,
            } => {
                let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                Duration::from_secs_f64(initial.as_secs_f64() * multiplier.powi(exp))
            }
        }
    }
}

/// Retry configuration for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Policy with a fixed delay between attempts.
    pub fn fixed(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::Fixed(backoff),
        }
    }

    /// Policy with exponentially growing delays.
    pub fn exponential(max_attempts: u32, initial: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::Exponential {
                initial,
                multiplier,
            },
        }
    }

    /// Returns the maximum number of attempts, never less than 1.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Returns the backoff strategy.
    pub fn backoff(&self) -> BackoffStrategy {
        self.backoff
    }
}

/// Runs a step under its retry policy and timeout guard.
///
/// On timeout the in-flight execution future is dropped, cancelling the
/// step's work at its next suspension point. Side effects already issued
/// before that point may still land; step authors remain responsible for
/// making compensations cover them.
pub(crate) async fn run_step(step: &Step) -> Result<Value, SagaError> {
    match step.timeout() {
        Some(timeout) => match tokio::time::timeout(timeout, run_with_retry(step)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SagaError::StepTimeout {
                step: step.name().to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
        },
        None => run_with_retry(step).await,
    }
}

/// Calls the step's forward operation up to `max_attempts` times.
///
/// A successful attempt short-circuits immediately. Attempt counts surface
/// through logs only, never through the ledger.
async fn run_with_retry(step: &Step) -> Result<Value, SagaError> {
    let policy = step.retry_policy().copied();
    let max_attempts = policy.map_or(1, |p| p.max_attempts());
    let mut attempt = 1u32;

    loop {
        match step.invoke().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(
                        step = step.name(),
                        attempts_made = attempt,
                        "step succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Err(err) if attempt < max_attempts => {
                let delay = policy
                    .map(|p| p.backoff().delay(attempt))
                    .unwrap_or(Duration::ZERO);
                tracing::debug!(
                    step = step.name(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "step attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                return Err(if max_attempts > 1 {
                    SagaError::RetriesExhausted {
                        step: step.name().to_string(),
                        attempts: max_attempts,
                        reason: err.to_string(),
                    }
                } else {
                    SagaError::StepExecution {
                        step: step.name().to_string(),
                        reason: err.to_string(),
                    }
                });
            }
        }
    }
}
