use gridlock::scenarios::{WORKER_COUNT, no_preemption};
use gridlock::{HoldStrategy, LockEvent, ScenarioOpts, registry};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
mod common;
use common::{OBSERVATION_WINDOW, count_event, observe};

#[test]
fn test_joining_the_workers_never_returns() {
    let observer = observe();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let opts = ScenarioOpts {
            hold: HoldStrategy::Park,
        };
        no_preemption::run(&opts);

        // Unreachable while the winner holds the lock forever.
        let _ = tx.send(());
    });

    // The orchestrating call must still be blocked, under growing timeouts.
    assert!(
        rx.recv_timeout(Duration::from_secs(1)).is_err(),
        "the scenario returned within 1s"
    );
    assert!(
        rx.recv_timeout(Duration::from_secs(3)).is_err(),
        "the scenario returned within 4s"
    );

    // Same one-winner shape as the mutex scenario underneath.
    let records = observer.collect_for(OBSERVATION_WINDOW);
    assert_eq!(
        count_event(&records, "mylock", LockEvent::Waiting),
        WORKER_COUNT
    );
    assert_eq!(count_event(&records, "mylock", LockEvent::Locked), 1);
    assert_eq!(count_event(&records, "mylock", LockEvent::Released), 0);

    assert!(!registry::overlap_detected());

    // The joining thread and its workers are intentionally left deadlocked.
}
