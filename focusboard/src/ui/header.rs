//! Header rendering: date, clock, and day/night phase.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;
use crate::clock::{self, PhaseOverride};

/// Render the header: date, time, phase glyph, and any pinned override.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let phase = app.phase();
    let accent = theme::accent(phase);

    let mut spans = vec![
        Span::styled(clock::header_date(&app.now), theme::bold()),
        Span::raw("   "),
        Span::styled(clock::header_time(&app.now), theme::normal()),
        Span::raw("  "),
        Span::styled(phase.glyph(), theme::normal().fg(accent)),
    ];
    if app.phase_override != PhaseOverride::Auto {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", app.phase_override.label()),
            theme::dimmed(),
        ));
    }

    let block = Block::default()
        .title(Span::styled("Focusboard", theme::panel_title(accent)))
        .borders(Borders::ALL)
        .border_style(theme::normal().fg(accent));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
