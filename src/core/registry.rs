//! Observational bookkeeping of who holds and who waits.
//!
//! The registry records every holder transition of every resource so that
//! tests and external observers can verify exclusivity without perturbing
//! the contention itself. It never influences scheduling: workers report
//! into it and nothing reads it on any hot path.

use crate::core::types::{LockId, ThreadId};
use fxhash::FxHashMap;
use parking_lot::Mutex;

/// One observed change of a resource's holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderTransition {
    /// Resource whose holder changed
    pub lock_id: LockId,
    /// Holder before the change (None = the resource was free)
    pub from: Option<ThreadId>,
    /// Holder after the change (None = the resource became free)
    pub to: Option<ThreadId>,
}

#[derive(Default)]
struct Registry {
    /// Maps resources to the threads that currently hold them
    owners: FxHashMap<LockId, ThreadId>,
    /// Maps threads to the resource they are blocked acquiring
    waiting: FxHashMap<ThreadId, LockId>,
    /// Every holder change, in observation order
    transitions: Vec<HolderTransition>,
}

lazy_static::lazy_static! {
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry::default());
}

pub(crate) fn on_attempt(thread_id: ThreadId, lock_id: LockId) {
    REGISTRY.lock().waiting.insert(thread_id, lock_id);
}

pub(crate) fn on_acquired(thread_id: ThreadId, lock_id: LockId) {
    let mut registry = REGISTRY.lock();
    registry.waiting.remove(&thread_id);
    let previous = registry.owners.insert(lock_id, thread_id);
    registry.transitions.push(HolderTransition {
        lock_id,
        from: previous,
        to: Some(thread_id),
    });
}

pub(crate) fn on_released(_thread_id: ThreadId, lock_id: LockId) {
    let mut registry = REGISTRY.lock();
    let previous = registry.owners.remove(&lock_id);
    registry.transitions.push(HolderTransition {
        lock_id,
        from: previous,
        to: None,
    });
}

/// Thread currently holding the resource, if any
pub fn owner_of(lock_id: LockId) -> Option<ThreadId> {
    REGISTRY.lock().owners.get(&lock_id).copied()
}

/// Threads currently blocked acquiring the resource
pub fn waiters_on(lock_id: LockId) -> Vec<ThreadId> {
    REGISTRY
        .lock()
        .waiting
        .iter()
        .filter(|&(_, &waited)| waited == lock_id)
        .map(|(&thread_id, _)| thread_id)
        .collect()
}

/// Every holder transition observed so far, in order
pub fn transitions() -> Vec<HolderTransition> {
    REGISTRY.lock().transitions.clone()
}

/// True if any resource ever had two simultaneous holders
///
/// A transition whose `from` and `to` are both occupied means a thread was
/// recorded as acquiring a resource someone else still held — the one
/// invariant this whole system is built on would be broken.
pub fn overlap_detected() -> bool {
    REGISTRY
        .lock()
        .transitions
        .iter()
        .any(|t| t.from.is_some() && t.to.is_some())
}

/// Like [`overlap_detected`], restricted to one resource
pub fn overlap_on(lock_id: LockId) -> bool {
    REGISTRY
        .lock()
        .transitions
        .iter()
        .any(|t| t.lock_id == lock_id && t.from.is_some() && t.to.is_some())
}
