//! No-preemption deadlock: nothing can take the resource back.
//!
//! The same one-resource race as the mutex scenario, but this scenario then
//! joins all of its workers. Nothing can forcibly reclaim the resource from
//! the winner, so the join blocks not just the losing workers but the
//! orchestrating call itself: this function never returns.

use super::WORKER_COUNT;
use crate::core::resource::LockResource;
use crate::core::types::ScenarioOpts;
use crate::core::worker::{Worker, WorkerHandle, wait_for_all};
use std::sync::Arc;

/// Start the workers, then block until all of them finish — which is never
pub fn run(opts: &ScenarioOpts) {
    let mylock = Arc::new(LockResource::new("mylock"));

    let workers: Vec<WorkerHandle> = (1..=WORKER_COUNT)
        .map(|i| {
            Worker::new(format!("Worker {i}"))
                .acquire(&mylock)
                .never_release(opts.hold)
                .spawn()
        })
        .collect();

    // The join itself is the demonstration: the winner never releases, so
    // this scenario's own termination is deadlocked too.
    wait_for_all(workers);
}
