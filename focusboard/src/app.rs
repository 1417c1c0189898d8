//! Application state and event handling.

use chrono::DateTime;
use chrono_tz::Tz;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use focusboard_core::board::{Board, partition};
use focusboard_core::feed::TaskFeed;
use focusboard_core::task::TaskRecord;
use focusboard_core::timer::FocusTimer;

use crate::clock::{self, Phase, PhaseOverride};
use crate::net::NetCommand;
use crate::session::SessionTracker;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Work goals list (default).
    WorkGoals,
    /// Personal goals list.
    PersonalGoals,
    /// Timer panel.
    Timer,
}

/// Main application state.
pub struct App {
    /// Today's tasks split into the two goal buckets.
    pub board: Board,
    /// `lastUpdated` stamp from the most recent feed.
    pub last_updated: Option<String>,
    /// Whether the current board is the built-in sample feed.
    pub using_fallback: bool,
    /// The focus timer.
    pub timer: FocusTimer,
    /// Per-task session counts.
    pub tracker: SessionTracker,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected row in the work goals panel.
    pub selected_work: usize,
    /// Selected row in the personal goals panel.
    pub selected_personal: usize,
    /// Manual day/night override.
    pub phase_override: PhaseOverride,
    /// Display timezone.
    pub timezone: Tz,
    /// Clock snapshot, refreshed once a minute.
    pub now: DateTime<Tz>,
    /// Transient status-bar notice.
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an empty dashboard in the given timezone.
    #[must_use]
    pub fn new(timezone: Tz, tracker: SessionTracker) -> Self {
        Self {
            board: Board::default(),
            last_updated: None,
            using_fallback: false,
            timer: FocusTimer::new(),
            tracker,
            focus: PanelFocus::WorkGoals,
            selected_work: 0,
            selected_personal: 0,
            phase_override: PhaseOverride::Auto,
            timezone,
            now: clock::now_in(timezone),
            notice: None,
            should_quit: false,
        }
    }

    /// Replaces the board with a freshly fetched (or fallback) feed.
    ///
    /// Selection indices are clamped so a shrinking bucket cannot leave
    /// the cursor past the end.
    pub fn apply_feed(&mut self, feed: TaskFeed, fallback: bool) {
        let fetched = feed.tasks.len();
        self.board = partition(&feed.tasks);
        let dropped = fetched - self.board.len();
        if dropped > 0 {
            tracing::warn!(dropped, "tasks with unrecognized category labels not shown");
        }

        self.last_updated = feed.last_updated;
        self.using_fallback = fallback;
        self.selected_work = self
            .selected_work
            .min(self.board.work.len().saturating_sub(1));
        self.selected_personal = self
            .selected_personal
            .min(self.board.personal.len().saturating_sub(1));
    }

    /// Handle a key event.
    ///
    /// Returns `Some(NetCommand)` when the action needs network dispatch
    /// (refreshing the feed).
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<NetCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.cycle_focus_backward();
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char(' ') => {
                self.timer.toggle();
                None
            }
            KeyCode::Char('r') => {
                self.timer.reset();
                None
            }
            KeyCode::Char('m') => {
                self.timer.switch_mode();
                None
            }
            KeyCode::Char('d') => {
                self.phase_override = self.phase_override.cycled();
                None
            }
            KeyCode::Char('g') => {
                self.notice = Some("Refreshing feed".to_string());
                Some(NetCommand::RefreshFeed)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter => {
                self.start_selected();
                None
            }
            _ => None,
        }
    }

    /// One-second heartbeat: advances the countdown.
    ///
    /// A finished work interval lands in the session ledger here; the
    /// returned command asks the network layer for the matching
    /// annotation write.
    pub fn on_second(&mut self) -> Option<NetCommand> {
        let event = self.timer.tick()?;
        let count = self.tracker.record(&event);
        match (event.task, count) {
            (Some(task_id), Some(count)) => {
                self.notice = Some(format!("Focus session #{count} finished"));
                Some(NetCommand::RecordSession { task_id })
            }
            _ => {
                self.notice = Some("Focus session finished".to_string());
                None
            }
        }
    }

    /// One-minute heartbeat: refreshes the wall clock.
    pub fn on_minute(&mut self) {
        self.now = clock::now_in(self.timezone);
    }

    /// Effective day/night phase right now.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase_override.resolve(&self.now)
    }

    /// The task under the cursor in the focused goals panel.
    #[must_use]
    pub fn selected_task(&self) -> Option<&TaskRecord> {
        match self.focus {
            PanelFocus::WorkGoals => self.board.work.get(self.selected_work),
            PanelFocus::PersonalGoals => self.board.personal.get(self.selected_personal),
            PanelFocus::Timer => None,
        }
    }

    /// Ledger count for the task the timer is focused on.
    #[must_use]
    pub fn active_session_count(&self) -> Option<u32> {
        self.timer
            .active_task()
            .map(|task| self.tracker.count_for(task))
    }

    /// Name of the task the timer is focused on, if it is on the board.
    #[must_use]
    pub fn active_task_name(&self) -> Option<&str> {
        let active = self.timer.active_task()?;
        self.board
            .work
            .iter()
            .chain(self.board.personal.iter())
            .find(|task| &task.id == active)
            .map(|task| task.name.as_str())
    }

    /// Cycle focus forward: Work goals -> Personal goals -> Timer.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::WorkGoals => PanelFocus::PersonalGoals,
            PanelFocus::PersonalGoals => PanelFocus::Timer,
            PanelFocus::Timer => PanelFocus::WorkGoals,
        };
    }

    /// Cycle focus backward: Work goals -> Timer -> Personal goals.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::WorkGoals => PanelFocus::Timer,
            PanelFocus::Timer => PanelFocus::PersonalGoals,
            PanelFocus::PersonalGoals => PanelFocus::WorkGoals,
        };
    }

    /// Move the cursor up in the focused goals panel.
    const fn select_previous(&mut self) {
        match self.focus {
            PanelFocus::WorkGoals => {
                if self.selected_work > 0 {
                    self.selected_work -= 1;
                }
            }
            PanelFocus::PersonalGoals => {
                if self.selected_personal > 0 {
                    self.selected_personal -= 1;
                }
            }
            PanelFocus::Timer => {}
        }
    }

    /// Move the cursor down in the focused goals panel.
    fn select_next(&mut self) {
        match self.focus {
            PanelFocus::WorkGoals => {
                if self.selected_work < self.board.work.len().saturating_sub(1) {
                    self.selected_work += 1;
                }
            }
            PanelFocus::PersonalGoals => {
                if self.selected_personal < self.board.personal.len().saturating_sub(1) {
                    self.selected_personal += 1;
                }
            }
            PanelFocus::Timer => {}
        }
    }

    /// Start a focus countdown on the task under the cursor.
    fn start_selected(&mut self) {
        let Some((id, name)) = self
            .selected_task()
            .map(|task| (task.id.clone(), task.name.clone()))
        else {
            return;
        };
        self.timer.start(Some(id));
        self.notice = Some(format!("Focusing on {name}"));
    }
}
