// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::CadenceError;
use cadence_memo::{memoize, memoize_async, try_memoize};
use cadence_test_utils::test_data::{person_alice, person_bob};
use cadence_test_utils::{FlakyOperation, Person, TestError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (calls.clone(), calls)
}

#[test]
fn test_same_arguments_invoke_once() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let add = memoize(move |(a, b): &(i32, i32)| {
        seen.fetch_add(1, Ordering::SeqCst);
        a + b
    });

    // Act
    let first = add.call(&(1, 2))?;
    let second = add.call(&(1, 2))?;

    // Assert
    assert_eq!((first, second), (3, 3));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn test_argument_order_gives_distinct_entries() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let sub = memoize(move |(a, b): &(i32, i32)| {
        seen.fetch_add(1, Ordering::SeqCst);
        a - b
    });

    // Act
    let forward = sub.call(&(1, 2))?;
    let backward = sub.call(&(2, 1))?;

    // Assert
    assert_eq!((forward, backward), (-1, 1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(sub.len(), 2);

    Ok(())
}

#[test]
fn test_structurally_equal_values_share_an_entry() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let greet = memoize(move |person: &Person| {
        seen.fetch_add(1, Ordering::SeqCst);
        format!("hello {}", person.name)
    });

    // Act
    let first = greet.call(&person_alice())?;
    let again = greet.call(&Person::new("Alice".to_string(), 25))?;
    let other = greet.call(&person_bob())?;

    // Assert
    assert_eq!(first, "hello Alice");
    assert_eq!(again, first);
    assert_eq!(other, "hello Bob");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    Ok(())
}

#[test]
fn test_errors_are_not_cached() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let parse = try_memoize(move |input: &str| {
        let attempt = seen.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == 1 {
            Err(TestError::Permanent(format!("cannot parse {input}")))
        } else {
            Ok(input.len())
        }
    });

    // Act
    let failure = parse.call("abc");
    let success = parse.call("abc")?;
    let cached = parse.call("abc")?;

    // Assert
    let err = failure.unwrap_err();
    assert!(err.is_operation_failure());
    assert_eq!(
        err.downcast_failure::<TestError>(),
        Some(&TestError::Permanent("cannot parse abc".to_string()))
    );
    assert_eq!((success, cached), (3, 3));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(parse.len(), 1);

    Ok(())
}

#[test]
fn test_entries_are_write_once() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let stamp = memoize(move |_: &str| seen.fetch_add(1, Ordering::SeqCst));

    // Act
    let first = stamp.call("key")?;
    let second = stamp.call("key")?;

    // Assert
    assert_eq!(first, 0);
    assert_eq!(second, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[test]
fn test_unserializable_arguments_are_rejected() {
    // Arrange
    let (calls, seen) = counter();
    let size = memoize(move |map: &HashMap<(u8, u8), u8>| {
        seen.fetch_add(1, Ordering::SeqCst);
        map.len()
    });
    let mut arguments = HashMap::new();
    arguments.insert((1, 2), 3);

    // Act
    let result = size.call(&arguments);

    // Assert
    assert!(matches!(result, Err(CadenceError::Serialization { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(size.is_empty());
}

#[test]
fn test_non_finite_floats_do_not_share_an_entry() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let describe = memoize(move |x: &Option<f64>| {
        seen.fetch_add(1, Ordering::SeqCst);
        format!("{x:?}")
    });

    // Act
    let nan = describe.call(&Some(f64::NAN));
    let infinity = describe.call(&Some(f64::INFINITY));
    let none = describe.call(&None)?;

    // Assert
    assert!(matches!(nan, Err(CadenceError::Serialization { .. })));
    assert!(matches!(infinity, Err(CadenceError::Serialization { .. })));
    assert_eq!(none, "None");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(describe.len(), 1);

    Ok(())
}

#[test]
fn test_shared_across_threads() -> anyhow::Result<()> {
    // Arrange
    let (calls, seen) = counter();
    let square = Arc::new(memoize(move |n: &u64| {
        seen.fetch_add(1, Ordering::SeqCst);
        n * n
    }));
    square.call(&7)?;

    // Act
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let square = square.clone();
            thread::spawn(move || square.call(&7))
        })
        .collect();

    // Assert
    for handle in handles {
        let value = handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker panicked"))??;
        assert_eq!(value, 49);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_async_hit_skips_the_operation() -> anyhow::Result<()> {
    // Arrange
    tokio::time::pause();
    let operation = FlakyOperation::succeeding().with_latency(Duration::from_millis(10));
    let op = operation.clone();
    let fetch = memoize_async(move |_id: u32| op.run());

    // Act
    let first = fetch.call(7).await?;
    let second = fetch.call(7).await?;
    let other = fetch.call(8).await?;

    // Assert
    assert_eq!((first, second, other), (1, 1, 2));
    assert_eq!(operation.attempts(), 2);
    assert_eq!(fetch.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_async_failure_is_retried_on_next_call() -> anyhow::Result<()> {
    // Arrange
    let operation = FlakyOperation::failing(1);
    let op = operation.clone();
    let fetch = memoize_async(move |_id: &'static str| op.run());

    // Act
    let failure = fetch.call("user").await;
    let success = fetch.call("user").await?;

    // Assert
    assert_eq!(
        failure.unwrap_err().downcast_failure::<TestError>(),
        Some(&TestError::Transient(1))
    );
    assert_eq!(success, 2);
    assert_eq!(fetch.len(), 1);

    Ok(())
}
