use crossbeam_channel::Receiver;
use gridlock::LockEvent;
use gridlock::trace::{self, TraceRecord};
use std::time::{Duration, Instant};

/// Long enough for every worker to reach its blocked state
#[allow(dead_code)]
pub const OBSERVATION_WINDOW: Duration = Duration::from_secs(2);
/// A second look to prove nobody made progress after the window
#[allow(dead_code)]
pub const LIVENESS_RECHECK: Duration = Duration::from_secs(1);

/// Collects every trace record emitted while a scenario runs
pub struct TraceObserver {
    rx: Receiver<TraceRecord>,
}

/// Subscribe to the trace feed before starting a scenario
pub fn observe() -> TraceObserver {
    TraceObserver {
        rx: trace::subscribe(),
    }
}

impl TraceObserver {
    /// Drain every record that arrives before the window closes
    pub fn collect_for(&self, window: Duration) -> Vec<TraceRecord> {
        let deadline = Instant::now() + window;
        let mut records = Vec::new();
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match self.rx.recv_timeout(remaining) {
                Ok(record) => records.push(record),
                Err(_) => break,
            }
        }
        records
    }
}

/// Records for one worker/lock/event combination
#[allow(dead_code)]
pub fn count(records: &[TraceRecord], worker: &str, lock: &str, event: LockEvent) -> usize {
    records
        .iter()
        .filter(|r| r.worker == worker && r.lock == lock && r.event == event)
        .count()
}

/// Records for one lock/event combination, any worker
#[allow(dead_code)]
pub fn count_event(records: &[TraceRecord], lock: &str, event: LockEvent) -> usize {
    records
        .iter()
        .filter(|r| r.lock == lock && r.event == event)
        .count()
}
