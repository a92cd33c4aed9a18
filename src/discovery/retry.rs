//! Retry Policy
//!
//! Single retry loop shared by per-type listing, account discovery and
//! per-account resource discovery. Transient failures are recognised by
//! message text; backoff is linear and every wait races the run context.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

use super::context::DiscoveryContext;
use super::provider::ProviderError;

/// Message fragments that mark an error as transient (matched case-insensitively)
pub const RETRYABLE_PATTERNS: &[&str] = &[
    "timeout",
    "deadline exceeded",
    "rate limit",
    "throttle",
    "too many requests",
    "429",
    "503",
    "504",
    "connection reset",
    "connection refused",
    "temporary failure",
];

pub fn is_retryable(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    RETRYABLE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}

pub fn is_retryable_error(error: &ProviderError) -> bool {
    match error {
        ProviderError::Unsupported(_) => false,
        other => is_retryable(&other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first call; total calls are `attempts + 1`
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Wait before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }
}

#[derive(Debug)]
pub enum RetryOutcome<T> {
    Success(T),
    /// Budget exhausted or a non-retryable error
    Failed { error: ProviderError, attempts: u32 },
    /// The context finished; nothing should be recorded
    Cancelled,
}

impl<T> RetryOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryOutcome::Cancelled)
    }
}

pub async fn with_retry<T, F, Fut>(
    ctx: &DiscoveryContext,
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> RetryOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_error = None;
    let mut calls = 0;

    for attempt in 0..=policy.attempts {
        if attempt > 0 {
            let wait = policy.backoff(attempt);
            debug!(operation, attempt, wait_ms = wait.as_millis() as u64, "Retrying after backoff");
            if ctx.run(tokio::time::sleep(wait)).await.is_none() {
                return RetryOutcome::Cancelled;
            }
        }

        calls += 1;
        let Some(result) = ctx.run(op()).await else {
            return RetryOutcome::Cancelled;
        };

        match result {
            Ok(value) => return RetryOutcome::Success(value),
            Err(error) => {
                let retryable = is_retryable_error(&error);
                debug!(operation, attempt, retryable, error = %error, "Provider call failed");
                last_error = Some(error);
                if !retryable {
                    break;
                }
            }
        }
    }

    match last_error {
        Some(error) => RetryOutcome::Failed { error, attempts: calls },
        None => RetryOutcome::Cancelled,
    }
}
