//! # Gridlock
//!
//! A teaching tool that jams threads on purpose.
//!
//! Gridlock reproduces the four classical deadlock conditions — mutual
//! exclusion held indefinitely, hold-and-wait, no-preemption, and circular
//! wait — by orchestrating workers that contend for shared exclusive locks
//! in controlled, reproducible ways. Several scenarios hang forever by
//! design; killing the process is the intended ending, not a bug.
//!
//! ## Features
//!
//! - Four scripted deadlock scenarios, runnable from the CLI or as a library
//! - A live human-readable trace of every lock event
//! - Optional JSON-lines event log for later inspection
//! - A holder registry so tests can prove exclusivity was never violated
//! - Spin or park semantics for never-releasing holds

mod core;
pub use core::{
    Gridlock, registry, trace,
    resource::{LockGuard, LockResource},
    types::{HoldStrategy, LockEvent, LockId, ScenarioOpts, ThreadId},
    worker::{ReleasePolicy, Step, Worker, WorkerHandle, wait_for_all},
};

pub mod scenarios;

const BANNER: &str = r#"
   ___  ___  ___  ___  _     ___   ___  _  __
  / __|| _ \|_ _||   \| |   / _ \ / __|| |/ /
 | (_ ||   / | | | |) | |__| (_) | (__ |   <
  \___||_|_\|___||___/|____|\___/ \___||_|\_\
"#;
