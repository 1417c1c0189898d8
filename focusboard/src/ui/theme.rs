//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::clock::Phase;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Synced/success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning/fallback indicator color.
pub const WARNING: Color = Color::Yellow;

/// Accent color for the day phase.
pub const DAY_ACCENT: Color = Color::Yellow;

/// Accent color for the night phase.
pub const NIGHT_ACCENT: Color = Color::LightBlue;

/// Accent color for the given phase.
#[must_use]
pub const fn accent(phase: Phase) -> Color {
    match phase {
        Phase::Day => DAY_ACCENT,
        Phase::Night => NIGHT_ACCENT,
    }
}

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, completed tasks).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for DONE badges on completed tasks.
#[must_use]
pub fn done_badge() -> Style {
    Style::default()
        .fg(SUCCESS)
        .bg(Color::Rgb(30, 30, 50))
        .add_modifier(Modifier::BOLD)
}

/// Style for empty-state panel text (italic, dim blue).
#[must_use]
pub fn empty_state() -> Style {
    Style::default()
        .fg(Color::Rgb(100, 140, 180))
        .add_modifier(Modifier::ITALIC)
}

/// Style for the countdown readout; dimmed while paused.
#[must_use]
pub fn countdown(running: bool) -> Style {
    let color = if running { FG_PRIMARY } else { FG_SECONDARY };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
