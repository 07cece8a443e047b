use crate::core::registry;
use crate::core::trace;
use crate::core::types::{LockEvent, LockId, ThreadId, get_current_thread_id};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

// Global counter for generating unique lock IDs
static NEXT_LOCK_ID: AtomicUsize = AtomicUsize::new(1);

/// One contended exclusive resource
///
/// A `LockResource` is a named mutual-exclusion primitive. Exactly one worker
/// may hold it at a time; everyone else blocks in `acquire` until the holder
/// lets go — which, in the deadlock scenarios, may be never. There is no
/// timeout variant: blocking forever is the mechanism by which deadlocks are
/// realized. Creation cannot fail.
///
/// Each acquisition announces itself on the trace channel and reports its
/// holder transitions to the [registry](crate::registry), so observers can
/// reconstruct who held what without perturbing the contention itself.
///
/// # Example
///
/// ```rust
/// use gridlock::LockResource;
/// use std::sync::Arc;
///
/// let desk = Arc::new(LockResource::new("desk"));
/// {
///     let _guard = desk.acquire("Clerk");
///     // exclusive access to the desk
/// } // released (and traced) here
/// ```
pub struct LockResource {
    /// Unique identifier for this resource
    id: LockId,
    /// Diagnostic name used in trace output
    name: String,
    /// The wrapped mutex; its queue order is whatever the platform gives us
    inner: Mutex<()>,
}

/// Guard for a held [`LockResource`], reports the release when dropped
///
/// Dropping the guard emits the `Released` trace line (unless the
/// acquisition was quiet) and clears the holder in the registry before the
/// underlying mutex unlocks, so no observer ever sees two holders at once.
pub struct LockGuard<'a> {
    /// Worker name for trace output
    worker: &'a str,
    /// The resource this guard holds
    resource: &'a LockResource,
    /// Thread that owns this guard
    thread_id: ThreadId,
    /// Whether Locked/Released lines are emitted for this acquisition
    announce: bool,
    /// The inner mutex guard; unlocks after the Drop body runs
    _guard: MutexGuard<'a, ()>,
}

impl LockResource {
    /// Create a new resource with an automatically assigned ID
    pub fn new(name: impl Into<String>) -> Self {
        LockResource {
            id: NEXT_LOCK_ID.fetch_add(1, Ordering::SeqCst),
            name: name.into(),
            inner: Mutex::new(()),
        }
    }

    /// Get the ID of this resource
    pub fn id(&self) -> LockId {
        self.id
    }

    /// Get the diagnostic name of this resource
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the resource is free, then hold it exclusively
    ///
    /// Emits a `Waiting` trace line before blocking and a `Locked` line once
    /// the resource is held. The wait queue order is unspecified; no fairness
    /// is guaranteed or required.
    ///
    /// Re-acquiring a resource the calling thread already holds deadlocks the
    /// caller; scripts must not do it.
    pub fn acquire<'a>(&'a self, worker: &'a str) -> LockGuard<'a> {
        self.lock_as(worker, true)
    }

    /// Like [`acquire`](Self::acquire), but only the `Waiting` line is emitted
    ///
    /// A quiet acquisition still blocks, still holds exclusively, and still
    /// reports holder transitions to the registry; it just never announces
    /// success or release. Pure contenders use this to pile onto a resource
    /// without claiming any trace lines of their own.
    pub fn acquire_quiet<'a>(&'a self, worker: &'a str) -> LockGuard<'a> {
        self.lock_as(worker, false)
    }

    fn lock_as<'a>(&'a self, worker: &'a str, announce: bool) -> LockGuard<'a> {
        let thread_id = get_current_thread_id();

        trace::emit(worker, &self.name, thread_id, self.id, LockEvent::Waiting);
        registry::on_attempt(thread_id, self.id);

        let guard = self.inner.lock();

        registry::on_acquired(thread_id, self.id);
        if announce {
            trace::emit(worker, &self.name, thread_id, self.id, LockEvent::Locked);
        }

        LockGuard {
            worker,
            resource: self,
            thread_id,
            announce,
            _guard: guard,
        }
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        // Trace and clear the holder first; the inner guard unlocks after
        // this body, so the release is always recorded before the next
        // acquisition can be.
        if self.announce {
            trace::emit(
                self.worker,
                self.resource.name(),
                self.thread_id,
                self.resource.id(),
                LockEvent::Released,
            );
        }
        registry::on_released(self.thread_id, self.resource.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_per_resource() {
        let a = LockResource::new("unit-res-a");
        let b = LockResource::new("unit-res-b");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "unit-res-a");
    }

    #[test]
    fn holder_is_tracked_for_the_guard_lifetime() {
        let res = LockResource::new("unit-res-held");
        assert!(registry::owner_of(res.id()).is_none());
        {
            let _guard = res.acquire("unit-holder");
            assert_eq!(
                registry::owner_of(res.id()),
                Some(get_current_thread_id())
            );
        }
        assert!(registry::owner_of(res.id()).is_none());
    }
}
