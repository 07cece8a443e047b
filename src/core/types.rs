use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread identifier type
///
/// Uniquely identifies a thread in the application.
pub type ThreadId = usize;

// Global counter for assigning unique thread IDs
static THREAD_ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

// Thread-local storage for each thread's assigned ID
thread_local! {
    static THREAD_ID: ThreadId = {
        // Each thread gets a unique ID once, when this is first accessed
        THREAD_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
    };
}

/// Get a unique identifier of the current thread
/// This will always return the same ID for the lifetime of the thread
pub fn get_current_thread_id() -> ThreadId {
    THREAD_ID.with(|&id| id)
}

/// Lock identifier type
///
/// Uniquely identifies a lock resource in the application. Each
/// [`LockResource`](crate::LockResource) is assigned a unique ID when created.
pub type LockId = usize;

/// The observable stages of one lock acquisition
///
/// Every acquisition emits `Waiting` before blocking and `Locked` once the
/// resource is held; `Released` is emitted when (and only if) the holder
/// gives the resource back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LockEvent {
    /// A worker announced it wants the resource and may now block
    Waiting,
    /// The worker holds the resource exclusively
    Locked,
    /// The worker gave the resource back
    Released,
}

/// How a worker that never releases its resources occupies its thread
///
/// `Spin` is the faithful rendition of a process that keeps running while
/// refusing to give anything back. `Park` trades the burned CPU for an
/// equivalent permanent block; the resources stay held forever either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldStrategy {
    /// Busy-loop while holding everything (default)
    #[default]
    Spin,
    /// Park the thread forever instead of spinning
    Park,
}

/// Per-run options handed to every scenario function
///
/// Scenarios own the resources and workers they create; the only knob they
/// share is how never-releasing workers occupy their threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioOpts {
    /// Hold strategy for workers with a never-release policy
    pub hold: HoldStrategy,
}
