//! Mutual-exclusion deadlock: the minimal one.
//!
//! Ten workers race for a single resource. Exactly one wins and holds it
//! forever; the other nine block in `acquire` permanently. A single
//! exclusive resource with no release path starves every other contender
//! indefinitely.

use super::WORKER_COUNT;
use crate::core::resource::LockResource;
use crate::core::types::ScenarioOpts;
use crate::core::worker::{Worker, WorkerHandle};
use std::sync::Arc;

/// Start the workers and return their handles immediately
///
/// No join is performed here: control goes back to the caller while the
/// workers stay blocked (or holding) in the background.
pub fn run(opts: &ScenarioOpts) -> Vec<WorkerHandle> {
    let lock1 = Arc::new(LockResource::new("lock1"));

    (1..=WORKER_COUNT)
        .map(|i| {
            Worker::new(format!("Worker {i}"))
                .acquire(&lock1)
                .never_release(opts.hold)
                .spawn()
        })
        .collect()
}
