//! The four deadlock orchestrations.
//!
//! Each scenario is a pure setup function: it constructs its own resources
//! and workers, wires the acquisition order, starts everything, and — in two
//! of the four cases — returns while the workers live on. These are
//! probabilistic demonstrations, not deterministic proofs: the fixed pauses
//! make the deadlock overwhelmingly likely, they do not force it.

pub mod circular_wait;
pub mod hold_and_wait;
pub mod mutex;
pub mod no_preemption;

use crate::core::types::ScenarioOpts;
use crate::core::worker::wait_for_all;
use clap::ValueEnum;

/// Number of contending workers in the single-resource scenarios
pub const WORKER_COUNT: usize = 10;

/// The selectable deadlock scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// One resource, ten workers; the winner never lets go and starves the rest
    #[value(name = "mutex")]
    Mutex,
    /// A worker holds one resource while waiting for another that is never freed
    #[value(name = "holdnwait")]
    HoldAndWait,
    /// Like mutex, but the caller joins its workers and blocks forever too
    #[value(name = "nopreemption")]
    NoPreemption,
    /// Three workers acquire three resources in a ring and deadlock in a cycle
    #[value(name = "circularwait")]
    CircularWait,
}

/// Run the selected scenario
///
/// For the scenarios whose setup returns (mutex, circularwait) this then
/// blocks on [`wait_for_all`], keeping the process attached to its workers;
/// the other two never come back from their own setup. In every deadlocked
/// outcome this call never returns and the process must be killed from
/// outside.
pub fn run(kind: ScenarioKind, opts: &ScenarioOpts) {
    match kind {
        ScenarioKind::Mutex => wait_for_all(mutex::run(opts)),
        ScenarioKind::HoldAndWait => hold_and_wait::run(opts),
        ScenarioKind::NoPreemption => no_preemption::run(opts),
        ScenarioKind::CircularWait => wait_for_all(circular_wait::run(opts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_tokens_round_trip() {
        assert_eq!(
            ScenarioKind::from_str("mutex", false),
            Ok(ScenarioKind::Mutex)
        );
        assert_eq!(
            ScenarioKind::from_str("holdnwait", false),
            Ok(ScenarioKind::HoldAndWait)
        );
        assert_eq!(
            ScenarioKind::from_str("nopreemption", false),
            Ok(ScenarioKind::NoPreemption)
        );
        assert_eq!(
            ScenarioKind::from_str("circularwait", false),
            Ok(ScenarioKind::CircularWait)
        );
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!(ScenarioKind::from_str("bogus", false).is_err());
        assert!(ScenarioKind::from_str("", false).is_err());
    }
}
