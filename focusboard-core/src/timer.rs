//! Focus-timer state machine.
//!
//! A countdown over two fixed-duration modes, driven by an externally
//! injected one-second tick. All operations are total functions over the
//! state; the only observable output is the completion event returned by
//! [`FocusTimer::tick`] when a Work countdown reaches zero.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Work-mode countdown length in seconds (25 minutes).
pub const WORK_SECS: u32 = 25 * 60;

/// Break-mode countdown length in seconds (5 minutes).
pub const BREAK_SECS: u32 = 5 * 60;

/// The timer's two duration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    /// A 25-minute focus interval.
    Work,
    /// A 5-minute rest interval.
    Break,
}

impl TimerMode {
    /// Full countdown duration for this mode, in seconds.
    #[must_use]
    pub const fn duration_secs(self) -> u32 {
        match self {
            Self::Work => WORK_SECS,
            Self::Break => BREAK_SECS,
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Break => write!(f, "break"),
        }
    }
}

/// Emitted when a Work-mode countdown reaches zero.
///
/// Break countdowns never produce one. `task` is `None` when the timer was
/// started without a focused task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    /// The task the finished interval was focused on, if any.
    pub task: Option<TaskId>,
}

/// Countdown state machine behind the dashboard's timer panel.
///
/// Invariant: `remaining_secs` stays within `[0, mode duration]`, and
/// `running` is forced false whenever it reaches zero. The machine holds no
/// storage; persisting completion counts is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTimer {
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
    active_task: Option<TaskId>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// Creates an idle Work-mode timer at the full duration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: TimerMode::Work,
            remaining_secs: WORK_SECS,
            running: false,
            active_task: None,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The task this countdown is focused on, if any.
    #[must_use]
    pub const fn active_task(&self) -> Option<&TaskId> {
        self.active_task.as_ref()
    }

    /// Starts a countdown from the current mode's full duration, focusing
    /// the given task (or none). Always succeeds, even mid-countdown.
    pub fn start(&mut self, task: Option<TaskId>) {
        self.active_task = task;
        self.remaining_secs = self.mode.duration_secs();
        self.running = true;
    }

    /// Pauses or resumes the countdown. No-op once it has expired.
    pub fn toggle(&mut self) {
        if self.remaining_secs == 0 {
            return;
        }
        self.running = !self.running;
    }

    /// Advances the countdown by one second.
    ///
    /// Ticks are ignored while paused or expired. When a countdown reaches
    /// zero the timer stops, and a Work-mode expiry returns the completion
    /// event carrying the focused task; Break expiries return nothing.
    pub fn tick(&mut self) -> Option<CompletionEvent> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        match self.mode {
            TimerMode::Work => Some(CompletionEvent {
                task: self.active_task.clone(),
            }),
            TimerMode::Break => None,
        }
    }

    /// Stops the countdown and restores the current mode's full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.mode.duration_secs();
    }

    /// Stops the countdown, flips the mode, and loads the new mode's full
    /// duration.
    pub fn switch_mode(&mut self) {
        self.running = false;
        self.mode = self.mode.flipped();
        self.remaining_secs = self.mode.duration_secs();
    }

    /// Remaining time as zero-padded `MM:SS`.
    #[must_use]
    pub fn display_clock(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
