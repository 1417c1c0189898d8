//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};
use crate::clock;

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::WorkGoals | PanelFocus::PersonalGoals => {
            "Tab: switch panel | ↑↓/jk: select | Enter: focus task | g: refresh | q: quit"
        }
        PanelFocus::Timer => {
            "Tab: switch panel | Space: pause | r: reset | m: mode | d: phase | q: quit"
        }
    };

    let sync_label = clock::last_sync_label(app.last_updated.as_deref(), app.timezone);
    let (dot_color, status_text) = if app.using_fallback {
        (
            theme::WARNING,
            format!("Sample data | Last sync: {sync_label}"),
        )
    } else {
        (theme::SUCCESS, format!("Last sync: {sync_label}"))
    };

    let mut spans = vec![
        Span::styled("Focusboard v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            notice.as_str(),
            theme::normal().fg(theme::WARNING),
        ));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
