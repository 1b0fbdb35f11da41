// tests/scheduling_scenarios.rs

mod common;
use crate::common::bodies::{Mark, Timeline, fail_after, hang, succeed_after};
use crate::common::init_tracing;

use std::time::Duration;

use tokio::time::Instant;

use taskmill::dag::boxed_body;
use taskmill::{TaskManager, TaskStatus};

#[tokio::test(start_paused = true)]
async fn priority_and_dependencies_drive_launch_order() {
    init_tracing();

    let timeline = Timeline::new();
    let manager = TaskManager::new(2);

    let t1 = manager.register_boxed(timeline.body("T1", 2000), 2, [], None);
    let t2 = manager.register_boxed(timeline.body("T2", 1000), 1, [t1], None);
    let t3 = manager.register_boxed(timeline.body("T3", 500), 3, [], None);

    let started = Instant::now();
    manager.run().await;
    let elapsed = started.elapsed();

    let snapshot = manager.snapshot();
    assert!(snapshot.all_completed(), "{snapshot}");
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.get(t3), Some(TaskStatus::Completed));

    let t1_start = timeline.at(&Mark::Start("T1")).expect("T1 started");
    let t3_start = timeline.at(&Mark::Start("T3")).expect("T3 started");
    let t1_end = timeline.at(&Mark::End("T1")).expect("T1 finished");
    let t2_start = timeline.at(&Mark::Start("T2")).expect("T2 started");

    // T3 and T1 share the two slots from the start; T2 waits for T1 even
    // though T3 freed a slot long before.
    assert_eq!(t1_start, t3_start);
    assert!(t2_start >= t1_end);
    assert!(elapsed >= Duration::from_millis(3000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(3100), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn rejection_at_timeout_boundary_never_completes() {
    init_tracing();

    let manager = TaskManager::new(2);
    let x = manager.register_boxed(
        fail_after(1500, "late failure"),
        1,
        [],
        Some(Duration::from_millis(1500)),
    );
    let dependent = manager.register_boxed(succeed_after(10), 1, [x], None);

    manager.run().await;

    let snapshot = manager.snapshot();
    let x_status = snapshot.get(x).expect("x registered");
    assert!(
        matches!(x_status, TaskStatus::Timeout | TaskStatus::Failed),
        "unexpected status {x_status}"
    );
    assert_eq!(snapshot.get(dependent), Some(TaskStatus::Canceled));
}

#[tokio::test(start_paused = true)]
async fn immediate_failure_cancels_all_dependents() {
    init_tracing();

    let manager = TaskManager::new(1);
    let y = manager.register_boxed(fail_after(0, "boom"), 5, [], None);
    let z = manager.register_boxed(succeed_after(10), 1, [y], None);
    let w = manager.register_boxed(succeed_after(10), 1, [y], None);
    let downstream = manager.register_boxed(succeed_after(10), 1, [z, w], None);
    let unrelated = manager.register_boxed(succeed_after(10), 0, [], None);

    manager.run().await;

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.get(y), Some(TaskStatus::Failed));
    assert_eq!(snapshot.get(z), Some(TaskStatus::Canceled));
    assert_eq!(snapshot.get(w), Some(TaskStatus::Canceled));
    assert_eq!(snapshot.get(downstream), Some(TaskStatus::Canceled));
    assert_eq!(snapshot.get(unrelated), Some(TaskStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn timed_out_body_releases_its_slot() {
    init_tracing();

    let manager = TaskManager::new(1);
    let stuck = manager.register_boxed(hang(), 2, [], Some(Duration::from_millis(100)));
    let next = manager.register_boxed(succeed_after(50), 1, [], None);

    let started = Instant::now();
    manager.run().await;

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.get(stuck), Some(TaskStatus::Timeout));
    assert_eq!(snapshot.get(next), Some(TaskStatus::Completed));
    assert!(started.elapsed() >= Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn failure_leaves_running_work_alone() {
    init_tracing();

    // `b` only waits on `a`, so it is running when `c` fails; `d` waits on
    // both and is still pending at that point.
    let manager = TaskManager::new(3);
    let a = manager.register_boxed(succeed_after(10), 0, [], None);
    let c = manager.register_boxed(fail_after(100, "late"), 0, [], None);
    let b = manager.register_boxed(succeed_after(500), 0, [a], None);
    let d = manager.register_boxed(succeed_after(10), 0, [b, c], None);

    manager.run().await;

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.get(c), Some(TaskStatus::Failed));
    assert_eq!(snapshot.get(b), Some(TaskStatus::Completed));
    assert_eq!(snapshot.get(d), Some(TaskStatus::Canceled));
}

#[tokio::test]
async fn panicking_body_fails_without_failing_the_run() {
    init_tracing();

    let manager = TaskManager::new(2);
    let bad = manager.register(|| async { panic!("body exploded") }, 0, [], None);
    let after_bad = manager.register(|| async { Ok(()) }, 0, [bad], None);
    let fine = manager.register(|| async { Ok(()) }, 0, [], None);

    manager.run().await;

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.get(bad), Some(TaskStatus::Failed));
    assert_eq!(snapshot.get(after_bad), Some(TaskStatus::Canceled));
    assert_eq!(snapshot.get(fine), Some(TaskStatus::Completed));
}

#[tokio::test]
async fn empty_run_returns_immediately() {
    let manager = TaskManager::new(4);
    manager.run().await;
    assert!(manager.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn tasks_are_never_rerun() {
    init_tracing();

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let manager = TaskManager::new(1);
    let counter = Arc::clone(&calls);
    let flaky = manager.register_boxed(
        boxed_body(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("always fails"))
        }),
        0,
        [],
        None,
    );

    manager.run().await;
    manager.run().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(manager.status_of(flaky), Some(TaskStatus::Failed));
}
