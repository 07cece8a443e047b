use gridlock::trace::TraceRecord;
use gridlock::{Gridlock, HoldStrategy, LockEvent, LockResource, Worker};
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_trace_log_records_lock_events_as_json_lines() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("gridlock_trace.log");

    let _opts = Gridlock::new()
        .with_trace_log(&path)
        .hold_strategy(HoldStrategy::Park)
        .start()
        .expect("Failed to initialize trace log");

    let desk = Arc::new(LockResource::new("desk"));
    Worker::new("Clerk").acquire(&desk).run();

    let contents = std::fs::read_to_string(&path).expect("Failed to read trace log");
    let records: Vec<TraceRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("every log line should be valid JSON"))
        .collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].event, LockEvent::Waiting);
    assert_eq!(records[1].event, LockEvent::Locked);
    assert_eq!(records[2].event, LockEvent::Released);
    assert!(records.iter().all(|r| r.worker == "Clerk" && r.lock == "desk"));

    // Timestamps are monotone enough to order the run.
    assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}
