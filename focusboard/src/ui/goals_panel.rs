//! Goal panel rendering for the two category buckets.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use focusboard_core::board::CategorySummary;
use focusboard_core::task::TaskRecord;

use super::theme;
use crate::app::{App, PanelFocus};
use crate::clock::Phase;

/// One bucket's worth of render inputs.
struct BucketView<'a> {
    title: &'a str,
    empty_text: &'a str,
    tasks: &'a [TaskRecord],
    summary: CategorySummary,
    selected: usize,
    is_focused: bool,
    is_active_phase: bool,
    accent: Color,
}

/// Render the work-goals panel.
pub fn render_work(frame: &mut Frame, area: Rect, app: &App) {
    render_bucket(
        frame,
        area,
        &BucketView {
            title: "日目標",
            empty_text: "今日尚無工作任務",
            tasks: &app.board.work,
            summary: app.board.work_summary(),
            selected: app.selected_work,
            is_focused: app.focus == PanelFocus::WorkGoals,
            is_active_phase: app.phase() == Phase::Day,
            accent: theme::DAY_ACCENT,
        },
    );
}

/// Render the personal-goals panel.
pub fn render_personal(frame: &mut Frame, area: Rect, app: &App) {
    render_bucket(
        frame,
        area,
        &BucketView {
            title: "夜目標",
            empty_text: "今日尚無個人任務",
            tasks: &app.board.personal,
            summary: app.board.personal_summary(),
            selected: app.selected_personal,
            is_focused: app.focus == PanelFocus::PersonalGoals,
            is_active_phase: app.phase() == Phase::Night,
            accent: theme::NIGHT_ACCENT,
        },
    );
}

fn render_bucket(frame: &mut Frame, area: Rect, view: &BucketView<'_>) {
    let items: Vec<ListItem> = if view.tasks.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            view.empty_text,
            theme::empty_state(),
        )))]
    } else {
        view.tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| task_row(task, view.is_focused && idx == view.selected))
            .collect()
    };

    let title = format!(
        "{} {}% ({}/{})",
        view.title, view.summary.percent, view.summary.completed, view.summary.total
    );

    // The bucket matching the current phase keeps its accent border even
    // when unfocused.
    let border_style = if view.is_focused {
        theme::highlighted()
    } else if view.is_active_phase {
        theme::normal().fg(view.accent)
    } else {
        theme::normal()
    };

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(view.accent)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn task_row(task: &TaskRecord, selected: bool) -> ListItem<'_> {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };
    let base = if task.completed {
        theme::dimmed()
    } else {
        theme::normal()
    };

    let mut spans = vec![
        Span::styled(checkbox, base),
        Span::raw(" "),
        Span::styled(task.name.as_str(), base),
    ];
    if task.completed {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(" DONE ", theme::done_badge()));
    }

    let item = ListItem::new(Line::from(spans));
    if selected {
        item.style(theme::selected())
    } else {
        item
    }
}
