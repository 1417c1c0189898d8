//! Terminal UI rendering.

pub mod goals_panel;
pub mod header;
pub mod status_bar;
pub mod theme;
pub mod timer_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header on top, status bar at the bottom, panels in between.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, main_chunks[0], app);

    // Three-column layout: the two goal buckets and the timer.
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(36), // Work goals
            Constraint::Percentage(36), // Personal goals
            Constraint::Percentage(28), // Timer
        ])
        .split(main_chunks[1]);

    goals_panel::render_work(frame, content_chunks[0], app);
    goals_panel::render_personal(frame, content_chunks[1], app);
    timer_panel::render(frame, content_chunks[2], app);

    status_bar::render(frame, main_chunks[2], app);
}
