//! Timer panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use focusboard_core::timer::TimerMode;

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the focus-timer panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Timer;
    let running = app.timer.is_running();

    let state_glyph = if running { "\u{25b6}" } else { "\u{23f8}" };
    let (mode_label, mode_style) = match app.timer.mode() {
        TimerMode::Work => ("Focus", theme::normal().fg(theme::WARNING)),
        TimerMode::Break => ("Rest", theme::normal().fg(theme::SUCCESS)),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(state_glyph, mode_style),
            Span::raw("  "),
            Span::styled(app.timer.display_clock(), theme::countdown(running)),
        ]),
        Line::from(Span::styled(mode_label, mode_style)),
    ];

    if let Some(name) = app.active_task_name() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(name.to_string(), theme::normal())));
        if let Some(count) = app.active_session_count() {
            lines.push(Line::from(Span::styled(
                format!("\u{1f345} x{count}"),
                theme::dimmed(),
            )));
        }
    }

    let block = Block::default()
        .title(Span::styled("Timer", theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
