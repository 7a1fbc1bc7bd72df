// ABOUTME: Retry policy for the generative endpoint with backoff-and-jitter on rate limits
// ABOUTME: Rate-limit and transport failures share one attempt budget per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::constants::remote_call;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Why a single request attempt failed
///
/// Classified by the caller so the policy can pick the right delay:
/// rate limits back off exponentially, transport failures wait a flat
/// interval, and everything else stops the loop at once.
#[derive(Debug)]
pub enum AttemptError {
    /// Endpoint answered HTTP 429
    RateLimited,
    /// No usable response at all (connect, DNS, timeout, unreadable body)
    Transport(String),
    /// Any other failure; retrying would repeat the same outcome
    Fatal(AppError),
}

/// Retry configuration for one logical remote call
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial one
    pub max_retries: u32,
    /// Backoff base in milliseconds, doubled on each rate-limit retry
    pub base_delay_ms: u64,
    /// Upper bound (exclusive) of the uniform jitter added to each backoff
    pub max_jitter_ms: u64,
    /// Flat delay in milliseconds before retrying a transport failure
    pub transport_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: remote_call::MAX_RETRIES,
            base_delay_ms: remote_call::BASE_DELAY_MS,
            max_jitter_ms: remote_call::MAX_JITTER_MS,
            transport_delay_ms: remote_call::TRANSPORT_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries, useful in tests
    #[must_use]
    pub const fn no_retries() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_jitter_ms: 0,
            transport_delay_ms: 0,
        }
    }

    /// Run `attempt_fn` until it succeeds, fails fatally, or exhausts the budget
    ///
    /// The attempt counter starts fresh on every call and is shared between
    /// the rate-limit and transport paths: a caller oscillating between the
    /// two failure modes still stops after the same total number of tries.
    /// Delay before rate-limit retry k is `base * 2^(k-1)` plus uniform
    /// jitter; transport retries wait the flat transport delay. Sleeps are
    /// non-blocking and suspend only the calling task.
    ///
    /// # Errors
    ///
    /// Returns the inner error of `AttemptError::Fatal` unchanged,
    /// `ErrorCode::ExternalRateLimited` when the budget ends on a rate
    /// limit, or `ErrorCode::ExternalServiceUnavailable` when it ends on a
    /// transport failure.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt_fn: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let max_retries = self.max_retries;
        let mut attempt: u32 = 0;
        loop {
            match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::RateLimited) => {
                    attempt += 1;
                    if attempt > max_retries {
                        warn!("{operation} rate limited - retry budget ({max_retries}) exhausted");
                        return Err(AppError::new(
                            ErrorCode::ExternalRateLimited,
                            format!("{operation} still rate limited after {max_retries} retries"),
                        ));
                    }
                    let delay_ms = self.backoff_delay_ms(attempt);
                    warn!(
                        "{operation} rate limited - retry {attempt}/{max_retries} after {delay_ms}ms backoff"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(AttemptError::Transport(reason)) => {
                    attempt += 1;
                    if attempt > max_retries {
                        warn!(
                            "{operation} unreachable ({reason}) - retry budget ({max_retries}) exhausted"
                        );
                        return Err(AppError::new(
                            ErrorCode::ExternalServiceUnavailable,
                            format!("{operation} unreachable after {max_retries} retries: {reason}"),
                        ));
                    }
                    let delay_ms = self.transport_delay_ms;
                    warn!(
                        "{operation} request failed ({reason}) - retry {attempt}/{max_retries} after {delay_ms}ms"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Exponential backoff plus jitter for the k-th rate-limit retry
    fn backoff_delay_ms(&self, attempt: u32) -> u64 {
        let backoff_ms = self.base_delay_ms * 2_u64.pow(attempt - 1);
        let jitter_ms = if self.max_jitter_ms > 0 {
            rand::thread_rng().gen_range(0..self.max_jitter_ms)
        } else {
            0
        };
        backoff_ms + jitter_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_default_policy_matches_endpoint_contract() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay_ms, 2000);
        assert_eq!(policy.max_jitter_ms, 1000);
        assert_eq!(policy.transport_delay_ms, 2000);
    }

    #[test]
    fn test_backoff_doubles_within_jitter_bounds() {
        let policy = RetryPolicy::default();
        for (attempt, base) in [(1, 2000), (2, 4000), (3, 8000), (4, 16000), (5, 32000)] {
            let delay = policy.backoff_delay_ms(attempt);
            assert!(delay >= base, "attempt {attempt}: {delay} < {base}");
            assert!(delay < base + 1000, "attempt {attempt}: {delay} too large");
        }
    }

    #[tokio::test]
    async fn test_fatal_error_stops_after_one_attempt() {
        let policy = RetryPolicy::default();
        let calls = Cell::new(0_u32);

        let result: AppResult<()> = policy
            .run("test call", || {
                calls.set(calls.get() + 1);
                async { Err(AttemptError::Fatal(AppError::internal("bad request"))) }
            })
            .await;

        assert_eq!(calls.get(), 1);
        assert_eq!(result.unwrap_err().code, ErrorCode::InternalError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failures_use_flat_delay() {
        let policy = RetryPolicy::default();
        let calls = Cell::new(0_u32);
        let started = tokio::time::Instant::now();

        let result = policy
            .run("test call", || {
                let n = calls.get() + 1;
                calls.set(n);
                async move {
                    if n <= 2 {
                        Err(AttemptError::Transport("connection reset".to_owned()))
                    } else {
                        Ok("reply")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "reply");
        assert_eq!(calls.get(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_failures_share_one_budget() {
        let policy = RetryPolicy::default();
        let calls = Cell::new(0_u32);

        // Alternating transport and rate-limit failures must stop after the
        // same six total attempts a pure rate-limit sequence would make.
        let result: AppResult<()> = policy
            .run("test call", || {
                let n = calls.get() + 1;
                calls.set(n);
                async move {
                    if n % 2 == 0 {
                        Err(AttemptError::RateLimited)
                    } else {
                        Err(AttemptError::Transport("timed out".to_owned()))
                    }
                }
            })
            .await;

        assert_eq!(calls.get(), 6);
        assert_eq!(result.unwrap_err().code, ErrorCode::ExternalRateLimited);
    }
}
