//! The shared trace channel.
//!
//! Every lock event goes three ways: a human-readable line on stdout (the
//! unsynchronized channel whose interleaving *is* the demonstration), an
//! optional JSON-lines file for later inspection, and a live feed that
//! observers can subscribe to. Only the stdout line is part of the show;
//! the other two exist so the show can be verified.

use crate::core::types::{LockEvent, LockId, ThreadId};
use anyhow::{Context, Result};
use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Structure for a single trace record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Worker that performed the action
    pub worker: String,
    /// Diagnostic name of the resource involved
    pub lock: String,
    /// Thread the worker was running on
    pub thread_id: ThreadId,
    /// ID of the resource involved
    pub lock_id: LockId,
    /// Type of event that occurred
    pub event: LockEvent,
    /// Seconds since Unix Epoch with microsecond precision
    pub timestamp: f64,
}

/// Determines how the file logger should operate
enum LoggerMode {
    /// File logging is disabled entirely
    Disabled,
    /// Log to the specified file
    ToFile(File),
}

struct TraceLogger {
    mode: LoggerMode,
}

impl TraceLogger {
    fn new() -> Self {
        TraceLogger {
            mode: LoggerMode::Disabled,
        }
    }

    fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context("Failed to open trace log file")?;

        Ok(TraceLogger {
            mode: LoggerMode::ToFile(file),
        })
    }

    fn log_record(&self, record: &TraceRecord) {
        if let LoggerMode::ToFile(ref file) = self.mode {
            let mut file = file;
            if let Ok(json) = serde_json::to_string(record) {
                let _ = writeln!(file, "{}", json);
                let _ = file.flush();
            }
        }
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<TraceLogger> = Mutex::new(TraceLogger::new());
    static ref SUBSCRIBERS: Mutex<Vec<Sender<TraceRecord>>> = Mutex::new(Vec::new());
}

/// Set the global trace log to the specified file, or disable it with None
pub fn init_trace_log<P: AsRef<Path>>(path: Option<P>) -> Result<()> {
    let mut global = GLOBAL_LOGGER.lock();
    match path {
        Some(path) => {
            *global = TraceLogger::with_file(path)
                .context("Failed to create trace logger with file")?;
        }
        None => {
            *global = TraceLogger::new();
        }
    }
    Ok(())
}

/// Open a live feed of every trace record emitted from now on
///
/// The feed is unbounded, so a slow observer never slows a worker down.
/// Dropping the receiver quietly unsubscribes it.
pub fn subscribe() -> Receiver<TraceRecord> {
    let (tx, rx) = unbounded();
    SUBSCRIBERS.lock().push(tx);
    rx
}

/// The human phrase for a lock event
fn phrase(event: LockEvent) -> &'static str {
    match event {
        LockEvent::Waiting => "are waiting to lock",
        LockEvent::Locked => "has locked",
        LockEvent::Released => "has released",
    }
}

/// Emit one lock event on every channel
pub(crate) fn emit(
    worker: &str,
    lock: &str,
    thread_id: ThreadId,
    lock_id: LockId,
    event: LockEvent,
) {
    // The human channel: interleaving across workers is nondeterministic
    // and that is the point.
    println!("{worker} {} {lock}", phrase(event));

    // Absolute timestamp as f64: seconds since Unix Epoch with microsecond precision
    let now = Utc::now();
    let timestamp = now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0;

    let record = TraceRecord {
        worker: worker.to_owned(),
        lock: lock.to_owned(),
        thread_id,
        lock_id,
        event,
        timestamp,
    };

    GLOBAL_LOGGER.lock().log_record(&record);
    SUBSCRIBERS
        .lock()
        .retain(|subscriber| subscriber.send(record.clone()).is_ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn phrases_match_the_trace_format() {
        assert_eq!(phrase(LockEvent::Waiting), "are waiting to lock");
        assert_eq!(phrase(LockEvent::Locked), "has locked");
        assert_eq!(phrase(LockEvent::Released), "has released");
    }

    #[test]
    fn subscribers_see_emitted_records() {
        // A very out-of-range id so records from parallel tests can be
        // filtered out.
        const LOCK_ID: LockId = 990_042;

        let rx = subscribe();
        emit("unit-observer-worker", "unit-observer-lock", 1, LOCK_ID, LockEvent::Waiting);

        loop {
            let record = rx
                .recv_timeout(Duration::from_secs(1))
                .expect("emitted record should reach the subscriber");
            if record.lock_id == LOCK_ID {
                assert_eq!(record.worker, "unit-observer-worker");
                assert_eq!(record.event, LockEvent::Waiting);
                break;
            }
        }
    }
}
