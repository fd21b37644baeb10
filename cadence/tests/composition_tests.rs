// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::prelude::*;
use cadence::CadenceError;
use cadence_test_utils::helpers::advance_ms;
use cadence_test_utils::{CallRecorder, FlakyOperation, TestError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::pause;

#[tokio::test]
async fn test_throttled_retry_runs_one_retry_loop_per_window() -> anyhow::Result<()> {
    // Arrange
    pause();
    let operation = FlakyOperation::failing(2);
    let op = operation.clone();
    let config = RetryConfig::new(3, Duration::from_millis(10));
    let sync = throttle_async(
        move |_: ()| {
            let op = op.clone();
            async move { retry_with(config, move || op.run()).await }
        },
        Duration::from_millis(100),
    );

    // Act
    let first = sync.call(()).await?;
    let dropped = sync.call(()).await?;

    // Assert
    assert_eq!(first, Some(3));
    assert_eq!(dropped, None);
    assert_eq!(operation.attempts(), 3);

    advance_ms(100).await;
    assert_eq!(sync.call(()).await?, Some(4));

    Ok(())
}

#[tokio::test]
async fn test_exhausted_retry_reopens_the_async_throttle() -> anyhow::Result<()> {
    // Arrange
    pause();
    let operation = FlakyOperation::failing(2);
    let op = operation.clone();
    let config = RetryConfig::new(1, Duration::from_millis(10));
    let sync = throttle_async(
        move |_: ()| {
            let op = op.clone();
            async move { retry_with(config, move || op.run()).await }
        },
        Duration::from_secs(60),
    );

    // Act
    let failure = sync.call(()).await;

    // Assert
    let err = failure.unwrap_err();
    let inner = err
        .downcast_failure::<CadenceError>()
        .ok_or_else(|| anyhow::anyhow!("expected the retry error inside"))?;
    assert!(matches!(inner, CadenceError::ExhaustedRetries { attempts: 2, .. }));
    assert_eq!(inner.downcast_failure::<TestError>(), Some(&TestError::Transient(2)));

    assert_eq!(sync.call(()).await?, Some(3));

    Ok(())
}

#[tokio::test]
async fn test_debounced_calls_feed_a_memoized_function() -> anyhow::Result<()> {
    // Arrange
    pause();
    let computed = Arc::new(AtomicUsize::new(0));
    let counter = computed.clone();
    let square = Arc::new(memoize(move |n: &u64| {
        counter.fetch_add(1, Ordering::SeqCst);
        n * n
    }));
    let recorder = CallRecorder::new();
    let record = recorder.callback();
    let cache = square.clone();
    let debounced = (move |n: u64| {
        if let Ok(value) = cache.call(&n) {
            record(value);
        }
    })
    .debounced(Duration::from_millis(50));

    // Act
    for n in [1, 2, 3] {
        debounced.call(n);
    }
    advance_ms(51).await;
    debounced.call(3);
    advance_ms(51).await;

    // Assert
    assert_eq!(recorder.args(), vec![9, 9]);
    assert_eq!(computed.load(Ordering::SeqCst), 1);
    assert_eq!(square.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_memoized_retry_only_retries_on_first_miss() -> anyhow::Result<()> {
    // Arrange
    pause();
    let operation = FlakyOperation::failing(1);
    let op = operation.clone();
    let config = RetryConfig::new(2, Duration::from_millis(5));
    let lookup = memoize_async(move |_key: String| {
        let op = op.clone();
        async move { retry_with(config, move || op.run()).await }
    });

    // Act
    let first = lookup.call("user".to_string()).await?;
    let second = lookup.call("user".to_string()).await?;

    // Assert
    assert_eq!((first, second), (2, 2));
    assert_eq!(operation.attempts(), 2);

    Ok(())
}

#[tokio::test]
async fn test_extension_traits_from_the_prelude() -> anyhow::Result<()> {
    // Arrange
    pause();
    let scroll = (|offset: u32| offset + 1).throttled(Duration::from_millis(10));
    let double = (|n: &i32| n * 2).memoized();
    let fetch = (|n: u8| async move { Ok::<_, TestError>(n) })
        .throttled_async(Duration::from_millis(10));

    // Act & Assert
    assert_eq!(scroll.call(1), Some(2));
    assert_eq!(scroll.call(2), None);
    assert_eq!(double.call(&4)?, 8);
    assert_eq!(fetch.call(5).await?, Some(5));
    assert_eq!(fetch.call(6).await?, None);

    Ok(())
}
