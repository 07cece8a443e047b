//! Circular-wait deadlock: the canonical cycle.
//!
//! Three workers, three resources, and an acquisition ring: each worker
//! takes its own resource, pauses, then goes after its neighbor's. The
//! uniform pause acts as a soft barrier — by the time anyone attempts its
//! second resource, every first resource is already held — so Worker 1
//! waits on Worker 2, Worker 2 on Worker 3, and Worker 3 on Worker 1.
//! Releases only happen after the second acquisition, which never comes.

use crate::core::resource::LockResource;
use crate::core::types::ScenarioOpts;
use crate::core::worker::{Worker, WorkerHandle};
use std::sync::Arc;
use std::time::Duration;

/// Start the three ring workers and return their handles immediately
pub fn run(_opts: &ScenarioOpts) -> Vec<WorkerHandle> {
    let locks: Vec<Arc<LockResource>> = (1..=3)
        .map(|i| Arc::new(LockResource::new(format!("lock{i}"))))
        .collect();

    (0..locks.len())
        .map(|i| {
            let own = &locks[i];
            let next = &locks[(i + 1) % locks.len()];
            Worker::new(format!("Worker {}", i + 1))
                .acquire(own)
                .pause(Duration::from_secs(2))
                .acquire(next)
                .spawn()
        })
        .collect()
}
