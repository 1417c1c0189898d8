// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::missing_docs_in_private_items
)]

//! Integration tests for session-count persistence across runs.
//!
//! Each "run" builds a fresh [`SessionTracker`] over a [`FileLedger`] at the
//! same path, drives the real timer state machine to completion, and checks
//! what the next run sees. The ledger file is the only state carried over.
//!
//! These tests validate:
//! - Counts recorded in one run are visible in the next
//! - Counts accumulate per task, independently
//! - The ledger file is a plain JSON count map
//! - Break intervals never touch the ledger
//! - A corrupt ledger file fails loudly instead of silently resetting

use std::path::Path;

use focusboard::session::{CompletionLedger, FileLedger, LedgerError, SessionTracker};
use focusboard_core::task::TaskId;
use focusboard_core::timer::{BREAK_SECS, FocusTimer, WORK_SECS};

/// Build a tracker over the ledger file at `path`.
fn tracker_at(path: &Path) -> SessionTracker {
    let ledger = FileLedger::load(path).expect("failed to load ledger");
    SessionTracker::new(Box::new(ledger))
}

/// Drive a full work countdown focused on `task` and record the completion.
/// Returns the task's new count.
fn run_full_countdown(tracker: &mut SessionTracker, task: &str) -> u32 {
    let mut timer = FocusTimer::new();
    timer.start(Some(TaskId::new(task)));

    let mut recorded = None;
    for _ in 0..WORK_SECS {
        if let Some(event) = timer.tick() {
            recorded = tracker.record(&event);
        }
    }
    recorded.expect("work countdown should record exactly one session")
}

// =============================================================================
// Counts survive a restart
// =============================================================================

#[test]
fn session_counts_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    // First run: two full sessions on the same task.
    let mut tracker = tracker_at(&path);
    assert_eq!(run_full_countdown(&mut tracker, "t-1"), 1);
    assert_eq!(run_full_countdown(&mut tracker, "t-1"), 2);
    drop(tracker);

    // Second run: the count picks up where the first left off.
    let mut tracker = tracker_at(&path);
    assert_eq!(tracker.count_for(&TaskId::new("t-1")), 2);
    assert_eq!(run_full_countdown(&mut tracker, "t-1"), 3);
}

#[test]
fn counts_accumulate_per_task_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    let mut tracker = tracker_at(&path);
    run_full_countdown(&mut tracker, "t-1");
    drop(tracker);

    let mut tracker = tracker_at(&path);
    run_full_countdown(&mut tracker, "t-2");
    run_full_countdown(&mut tracker, "t-1");
    drop(tracker);

    let tracker = tracker_at(&path);
    assert_eq!(tracker.count_for(&TaskId::new("t-1")), 2);
    assert_eq!(tracker.count_for(&TaskId::new("t-2")), 1);
    assert_eq!(tracker.count_for(&TaskId::new("t-3")), 0);
}

// =============================================================================
// File format
// =============================================================================

#[test]
fn ledger_file_is_a_plain_json_count_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    let mut tracker = tracker_at(&path);
    run_full_countdown(&mut tracker, "t-1");

    let contents = std::fs::read_to_string(&path).unwrap();
    let map: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(map, serde_json::json!({ "t-1": 1 }));
}

#[test]
fn break_intervals_never_touch_the_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    let mut tracker = tracker_at(&path);
    let mut timer = FocusTimer::new();
    timer.switch_mode();
    timer.start(Some(TaskId::new("t-1")));
    for _ in 0..BREAK_SECS {
        if let Some(event) = timer.tick() {
            tracker.record(&event);
        }
    }

    assert_eq!(tracker.count_for(&TaskId::new("t-1")), 0);
    assert!(!path.exists(), "no completion, no ledger file");
}

// =============================================================================
// Corrupt ledger handling
// =============================================================================

#[test]
fn corrupt_ledger_surfaces_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    std::fs::write(&path, "not a count map {").unwrap();

    // The load fails loudly; the main loop falls back to an in-memory
    // ledger rather than overwriting the file.
    assert!(matches!(FileLedger::load(&path), Err(LedgerError::Parse(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a count map {");
}

#[test]
fn reload_between_every_session_still_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    for expected in 1..=3 {
        let mut tracker = tracker_at(&path);
        assert_eq!(run_full_countdown(&mut tracker, "t-1"), expected);
    }

    let ledger = FileLedger::load(&path).unwrap();
    assert_eq!(ledger.get(&TaskId::new("t-1")), 3);
}
