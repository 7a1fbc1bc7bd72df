// ABOUTME: Integration tests for the remote-call retry contract under a paused clock
// ABOUTME: Verifies attempt budgets, backoff growth, flat transport delays, and fatal short-circuit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::cell::Cell;
use std::time::Duration;

use pierre_fitness_client::errors::{AppError, AppResult, ErrorCode};
use pierre_fitness_client::llm::{AttemptError, RetryPolicy};

/// Five rate-limit backoffs without jitter: 2 + 4 + 8 + 16 + 32 seconds
const FULL_BACKOFF_MS: u64 = 62_000;

/// Upper bound once each of the five backoffs draws its sub-second jitter
const FULL_BACKOFF_WITH_JITTER_MS: u64 = 67_000;

#[tokio::test(start_paused = true)]
async fn test_exhausted_rate_limit_budget_makes_six_attempts() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    let result: AppResult<()> = policy
        .run("generateContent", || {
            calls.set(calls.get() + 1);
            async { Err(AttemptError::RateLimited) }
        })
        .await;

    // Initial attempt plus five retries, then the budget is gone
    assert_eq!(calls.get(), 6);
    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(err.message.contains("still rate limited"));

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(FULL_BACKOFF_MS), "{elapsed:?}");
    assert!(
        elapsed < Duration::from_millis(FULL_BACKOFF_WITH_JITTER_MS),
        "{elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_immediate_success_sleeps_never() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    let result = policy
        .run("generateContent", || {
            calls.set(calls.get() + 1);
            async { Ok::<_, AttemptError>("reply") }
        })
        .await;

    assert_eq!(result.unwrap(), "reply");
    assert_eq!(calls.get(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_across_consecutive_rate_limits() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    let result = policy
        .run("generateContent", || {
            let n = calls.get() + 1;
            calls.set(n);
            async move {
                if n <= 2 {
                    Err(AttemptError::RateLimited)
                } else {
                    Ok("reply")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "reply");
    assert_eq!(calls.get(), 3);

    // First backoff 2s, second 4s, each plus up to a second of jitter
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(6_000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(8_000), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_transport_exhaustion_waits_flat_intervals() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    let result: AppResult<()> = policy
        .run("generateContent", || {
            calls.set(calls.get() + 1);
            async { Err(AttemptError::Transport("connection refused".to_owned())) }
        })
        .await;

    assert_eq!(calls.get(), 6);
    assert_eq!(
        result.unwrap_err().code,
        ErrorCode::ExternalServiceUnavailable
    );
    // Transport retries never back off: five flat two-second waits
    assert_eq!(started.elapsed(), Duration::from_millis(10_000));
}

#[tokio::test(start_paused = true)]
async fn test_attempt_counter_drives_backoff_after_transport_failures() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    // Two transport failures, then a rate limit, then success. The shared
    // counter is at three when the rate limit hits, so its backoff is
    // already at the third step (8s), not the first.
    let result = policy
        .run("generateContent", || {
            let n = calls.get() + 1;
            calls.set(n);
            async move {
                match n {
                    1 | 2 => Err(AttemptError::Transport("timed out".to_owned())),
                    3 => Err(AttemptError::RateLimited),
                    _ => Ok("reply"),
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "reply");
    assert_eq!(calls.get(), 4);

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(12_000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(13_000), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_fatal_failure_is_never_retried() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0_u32);
    let started = tokio::time::Instant::now();

    let result: AppResult<()> = policy
        .run("generateContent", || {
            calls.set(calls.get() + 1);
            async {
                Err(AttemptError::Fatal(AppError::external_service(
                    "gemini",
                    "generateContent returned 400 Bad Request",
                )))
            }
        })
        .await;

    assert_eq!(calls.get(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);

    // The fatal error surfaces unchanged
    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("400 Bad Request"));
}

#[tokio::test(start_paused = true)]
async fn test_every_call_starts_with_a_fresh_budget() {
    let policy = RetryPolicy::default();

    // Each logical call burns five retries and succeeds on the sixth
    // attempt. A counter surviving across calls would fail the second one.
    for _ in 0..2 {
        let calls = Cell::new(0_u32);
        let result = policy
            .run("generateContent", || {
                let n = calls.get() + 1;
                calls.set(n);
                async move {
                    if n <= 5 {
                        Err(AttemptError::RateLimited)
                    } else {
                        Ok("reply")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "reply");
        assert_eq!(calls.get(), 6);
    }
}

#[tokio::test]
async fn test_no_retries_policy_fails_on_first_rate_limit() {
    let policy = RetryPolicy::no_retries();
    let calls = Cell::new(0_u32);

    let result: AppResult<()> = policy
        .run("generateContent", || {
            calls.set(calls.get() + 1);
            async { Err(AttemptError::RateLimited) }
        })
        .await;

    assert_eq!(calls.get(), 1);
    assert_eq!(result.unwrap_err().code, ErrorCode::ExternalRateLimited);
}
