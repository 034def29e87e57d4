//! Loop cadence and shutdown behavior, under a paused clock.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeEvictor, FakeLister, FakeMetrics};
use preoomkiller_controller::{Controller, ControllerConfig};
use tokio_util::sync::CancellationToken;

/// Let the spawned loop catch up with whatever the clock just did.
async fn drain() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_cycle_runs_immediately() {
    let lister = FakeLister::default();
    let cycles = lister.calls.clone();
    let controller = Controller::new(
        lister,
        FakeMetrics::default(),
        FakeEvictor::default(),
        ControllerConfig::default(),
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(async move { controller.run(shutdown).await });

    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 1);
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_cycles_repeat_on_the_interval() {
    let lister = FakeLister::default();
    let cycles = lister.calls.clone();
    let controller = Controller::new(
        lister,
        FakeMetrics::default(),
        FakeEvictor::default(),
        ControllerConfig::default(),
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(async move { controller.run(shutdown).await });

    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(61)).await;
    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 2);

    tokio::time::sleep(Duration::from_secs(60)).await;
    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 3);
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_mid_wait_exits_without_another_cycle() {
    let lister = FakeLister::default();
    let cycles = lister.calls.clone();
    let controller = Controller::new(
        lister,
        FakeMetrics::default(),
        FakeEvictor::default(),
        ControllerConfig::default(),
    );
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    let handle = tokio::spawn(async move { controller.run(token).await });

    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 1);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop exits on cancellation")
        .expect("loop task does not panic");
    assert_eq!(cycles.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_a_failing_cycle_does_not_stop_the_loop() {
    let lister = FakeLister {
        fail: true,
        ..FakeLister::default()
    };
    let cycles = lister.calls.clone();
    let controller = Controller::new(
        lister,
        FakeMetrics::default(),
        FakeEvictor::default(),
        ControllerConfig::default(),
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(async move { controller.run(shutdown).await });

    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(61)).await;
    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 2);
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_is_clamped_instead_of_panicking() {
    let lister = FakeLister::default();
    let cycles = lister.calls.clone();
    let config = ControllerConfig {
        interval: Duration::ZERO,
        ..ControllerConfig::default()
    };
    let controller = Controller::new(
        lister,
        FakeMetrics::default(),
        FakeEvictor::default(),
        config,
    );
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(async move { controller.run(shutdown).await });

    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    drain().await;
    assert_eq!(cycles.load(Ordering::SeqCst), 2);
    handle.abort();
}
