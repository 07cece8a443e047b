//! Hold-and-wait deadlock: holding one resource while waiting for another.
//!
//! Worker 1 takes lock1, keeps it through a long pause, then goes after
//! lock2 — which the calling thread grabbed right away and never gives back.
//! Worker 2 exists only to pile onto lock1, showing that whatever Worker 1
//! holds while it waits is lost to everyone else too. The pause is a
//! demonstration-ordering aid: it lets Worker 2's block on lock1 be observed
//! before Worker 1's own block on lock2 shows up.

use crate::core::resource::LockResource;
use crate::core::types::ScenarioOpts;
use crate::core::worker::Worker;
use std::sync::Arc;
use std::time::Duration;

/// Run the scenario; the calling thread becomes the third contender and
/// never returns
pub fn run(opts: &ScenarioOpts) {
    let lock1 = Arc::new(LockResource::new("lock1"));
    let lock2 = Arc::new(LockResource::new("lock2"));

    let _holder = Worker::new("Worker 1")
        .acquire(&lock1)
        .pause(Duration::from_secs(3))
        .acquire(&lock2)
        .spawn();

    // Announces its wait on lock1 but stays silent if it ever gets it; it
    // exists purely to contend.
    let _contender = Worker::new("Worker 2")
        .contend(&lock1)
        .spawn();

    // The calling thread takes lock2 and never lets go, so Worker 1 can
    // never finish and lock1 never frees up.
    Worker::new("Main thread")
        .acquire(&lock2)
        .never_release(opts.hold)
        .run();
}
