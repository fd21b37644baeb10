// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::CadenceError;
use cadence_retry::{retry, retry_with, RetryConfig, RetryScheduler};
use cadence_test_utils::helpers::elapsed_ms;
use cadence_test_utils::{FlakyOperation, TestError};
use std::time::Duration;
use tokio::time::{pause, Instant};

fn config(max_attempts: u32, delay_ms: u64) -> RetryConfig {
    RetryConfig::new(max_attempts, Duration::from_millis(delay_ms))
}

#[tokio::test]
async fn test_succeeds_after_transient_failures() -> anyhow::Result<()> {
    // Arrange
    pause();
    let operation = FlakyOperation::failing(2);
    let op = operation.clone();

    // Act
    let value = retry_with(config(3, 100), move || op.run()).await?;

    // Assert
    assert_eq!(value, 3);
    assert_eq!(operation.attempts(), 3);

    Ok(())
}

#[tokio::test]
async fn test_first_success_does_not_wait() -> anyhow::Result<()> {
    // Arrange
    pause();
    let start = Instant::now();
    let operation = FlakyOperation::succeeding();
    let op = operation.clone();

    // Act
    let value = retry_with(config(3, 100), move || op.run()).await?;

    // Assert
    assert_eq!(value, 1);
    assert_eq!(operation.attempts(), 1);
    assert_eq!(elapsed_ms(start, Instant::now()), 0);

    Ok(())
}

#[tokio::test]
async fn test_exhaustion_reports_last_failure() {
    // Arrange
    pause();
    let operation = FlakyOperation::always_failing();
    let op = operation.clone();

    // Act
    let result = retry_with(config(2, 100), move || op.run()).await;

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, CadenceError::ExhaustedRetries { attempts: 3, .. }));
    assert_eq!(
        err.downcast_failure::<TestError>(),
        Some(&TestError::Transient(3))
    );
    assert_eq!(operation.attempts(), 3);
}

#[tokio::test]
async fn test_attempts_are_spaced_by_the_delay() {
    // Arrange
    pause();
    let start = Instant::now();
    let operation = FlakyOperation::always_failing();
    let op = operation.clone();

    // Act
    let _ = retry_with(config(3, 100), move || op.run()).await;

    // Assert
    let offsets: Vec<u128> = operation
        .attempt_times()
        .into_iter()
        .map(|at| elapsed_ms(start, at))
        .collect();
    assert_eq!(offsets, vec![0, 100, 200, 300]);
}

#[tokio::test]
async fn test_delay_starts_after_the_attempt_completes() {
    // Arrange
    pause();
    let start = Instant::now();
    let operation = FlakyOperation::failing(2).with_latency(Duration::from_millis(50));
    let op = operation.clone();

    // Act
    let value = retry_with(config(3, 100), move || op.run()).await;

    // Assert
    assert!(matches!(value, Ok(3)));
    let offsets: Vec<u128> = operation
        .attempt_times()
        .into_iter()
        .map(|at| elapsed_ms(start, at))
        .collect();
    assert_eq!(offsets, vec![0, 150, 300]);
}

#[tokio::test]
async fn test_zero_retries_runs_once() {
    // Arrange
    pause();
    let operation = FlakyOperation::always_failing();
    let op = operation.clone();

    // Act
    let result = retry_with(config(0, 100), move || op.run()).await;

    // Assert
    assert!(matches!(
        result,
        Err(CadenceError::ExhaustedRetries { attempts: 1, .. })
    ));
    assert_eq!(operation.attempts(), 1);
}

#[tokio::test]
async fn test_default_budget_and_delay() {
    // Arrange
    pause();
    let start = Instant::now();
    let operation = FlakyOperation::always_failing();
    let op = operation.clone();

    // Act
    let result = retry(move || op.run()).await;

    // Assert
    assert!(matches!(
        result,
        Err(CadenceError::ExhaustedRetries { attempts: 4, .. })
    ));
    assert_eq!(operation.attempts(), 4);
    assert_eq!(elapsed_ms(start, Instant::now()), 3000);
}

#[tokio::test]
async fn test_scheduler_is_reusable() -> anyhow::Result<()> {
    // Arrange
    pause();
    let scheduler: RetryScheduler = RetryScheduler::new(config(1, 10));
    let first = FlakyOperation::failing(1);
    let second = FlakyOperation::failing(1);

    // Act
    let a = scheduler.run(|| first.run()).await?;
    let b = scheduler.run(|| second.run()).await?;

    // Assert
    assert_eq!((a, b), (2, 2));
    assert_eq!(scheduler.config().max_attempts, 1);

    Ok(())
}

#[tokio::test]
async fn test_permanent_error_is_still_retried() {
    // Arrange
    pause();
    let mut calls = 0_u32;

    // Act
    let result = retry_with(config(2, 1), || {
        calls += 1;
        async { Err::<(), _>(TestError::Permanent("bad request".to_string())) }
    })
    .await;

    // Assert
    let err = result.unwrap_err();
    assert_eq!(calls, 3);
    assert!(err.to_string().contains("bad request"));
}

#[test]
fn test_negative_configuration_is_rejected() {
    assert!(RetryConfig::from_millis(-3, 100)
        .unwrap_err()
        .is_configuration());
    assert!(RetryConfig::from_millis(3, -1)
        .unwrap_err()
        .is_configuration());
}
