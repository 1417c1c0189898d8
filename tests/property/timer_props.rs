//! Property-based tests for the focus-timer state machine.
//!
//! Uses proptest to verify:
//! 1. Countdowns are strictly decreasing down to exactly zero, never below.
//! 2. Only a Work-mode expiry emits a completion event, and exactly one per
//!    countdown, carrying the focused task.
//! 3. `reset` and a double `switch_mode` restore the full duration stopped.
//! 4. Arbitrary operation sequences never break the timer invariants.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use focusboard_core::task::TaskId;
use focusboard_core::timer::{BREAK_SECS, FocusTimer, TimerMode, WORK_SECS};
use proptest::prelude::*;

// --- Strategies ---

/// Strategy for an optional focused task.
fn arb_task_ref() -> impl Strategy<Value = Option<TaskId>> {
    prop_oneof![
        Just(None),
        "[a-z0-9-]{1,32}".prop_map(|id| Some(TaskId::new(id))),
    ]
}

/// One user- or clock-driven operation on the timer.
#[derive(Debug, Clone)]
enum TimerOp {
    Start(Option<TaskId>),
    Toggle,
    Tick,
    Reset,
    SwitchMode,
}

/// Strategy for a single operation, biased toward ticks so random walks
/// actually run countdowns down.
fn arb_op() -> impl Strategy<Value = TimerOp> {
    prop_oneof![
        1 => arb_task_ref().prop_map(TimerOp::Start),
        2 => Just(TimerOp::Toggle),
        8 => Just(TimerOp::Tick),
        1 => Just(TimerOp::Reset),
        1 => Just(TimerOp::SwitchMode),
    ]
}

/// Applies one operation, returning whether a completion event fired.
fn apply(timer: &mut FocusTimer, op: &TimerOp) -> bool {
    match op {
        TimerOp::Start(task) => {
            timer.start(task.clone());
            false
        }
        TimerOp::Toggle => {
            timer.toggle();
            false
        }
        TimerOp::Tick => timer.tick().is_some(),
        TimerOp::Reset => {
            timer.reset();
            false
        }
        TimerOp::SwitchMode => {
            timer.switch_mode();
            false
        }
    }
}

// --- Property tests ---

proptest! {
    /// While running, every tick moves the countdown down by exactly one,
    /// producing a strictly decreasing sequence that stops at zero.
    #[test]
    fn countdown_strictly_decreases_to_zero(ticks in 1u32..=2000, task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.start(task);

        let mut previous = timer.remaining_secs();
        for _ in 0..ticks {
            timer.tick();
            let current = timer.remaining_secs();
            if previous > 0 {
                prop_assert_eq!(current, previous - 1);
            } else {
                prop_assert_eq!(current, 0);
            }
            previous = current;
        }
    }

    /// A full Work countdown emits exactly one completion event, carrying
    /// the focused task, and ends stopped at zero.
    #[test]
    fn work_countdown_emits_exactly_one_event(task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.start(task.clone());

        let mut events = Vec::new();
        for _ in 0..WORK_SECS {
            if let Some(event) = timer.tick() {
                events.push(event);
            }
        }
        prop_assert_eq!(events.len(), 1);
        prop_assert_eq!(&events[0].task, &task);
        prop_assert_eq!(timer.remaining_secs(), 0);
        prop_assert!(!timer.is_running());
    }

    /// A full Break countdown never emits a completion event, regardless of
    /// the focused task.
    #[test]
    fn break_countdown_emits_no_events(task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.switch_mode();
        timer.start(task);

        for _ in 0..BREAK_SECS {
            prop_assert!(timer.tick().is_none());
        }
        prop_assert_eq!(timer.remaining_secs(), 0);
        prop_assert!(!timer.is_running());
    }

    /// A paused countdown ignores ticks entirely.
    #[test]
    fn paused_countdown_ignores_ticks(ticks in 0u32..500, task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.start(task);
        timer.toggle();

        for _ in 0..ticks {
            prop_assert!(timer.tick().is_none());
        }
        prop_assert_eq!(timer.remaining_secs(), WORK_SECS);
    }

    /// `reset` restores the current mode's full duration from any point in
    /// a countdown and stops the timer.
    #[test]
    fn reset_restores_full_duration(ticks in 0u32..=WORK_SECS, task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.start(task);
        for _ in 0..ticks {
            timer.tick();
        }
        timer.reset();
        prop_assert!(!timer.is_running());
        prop_assert_eq!(timer.mode(), TimerMode::Work);
        prop_assert_eq!(timer.remaining_secs(), WORK_SECS);
    }

    /// Switching modes twice lands back on the original mode at its full
    /// duration, stopped.
    #[test]
    fn switch_mode_twice_restores_original_duration(ticks in 0u32..300, task in arb_task_ref()) {
        let mut timer = FocusTimer::new();
        timer.start(task);
        for _ in 0..ticks {
            timer.tick();
        }
        timer.switch_mode();
        timer.switch_mode();
        prop_assert!(!timer.is_running());
        prop_assert_eq!(timer.mode(), TimerMode::Work);
        prop_assert_eq!(timer.remaining_secs(), WORK_SECS);
    }

    /// No operation sequence can push the countdown outside
    /// `[0, mode duration]` or leave an expired countdown running.
    #[test]
    fn invariants_hold_under_arbitrary_ops(ops in prop::collection::vec(arb_op(), 0..400)) {
        let mut timer = FocusTimer::new();
        for op in &ops {
            apply(&mut timer, op);
            prop_assert!(timer.remaining_secs() <= timer.mode().duration_secs());
            if timer.remaining_secs() == 0 {
                prop_assert!(!timer.is_running());
            }
        }
    }

    /// Completion events only ever fire out of Work mode, at the moment the
    /// countdown hits zero.
    #[test]
    fn events_only_fire_from_work_expiry(ops in prop::collection::vec(arb_op(), 0..400)) {
        let mut timer = FocusTimer::new();
        for op in &ops {
            let fired = apply(&mut timer, op);
            if fired {
                prop_assert_eq!(timer.mode(), TimerMode::Work);
                prop_assert_eq!(timer.remaining_secs(), 0);
                prop_assert!(!timer.is_running());
            }
        }
    }
}
