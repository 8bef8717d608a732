use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, StatusKind, View};

const LABEL: &str = " Timetrack";

/// Title row: throbber, app name, breadcrumb and the API source.
pub fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let source = format!("{} ", app.source_label);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2 + LABEL.len() as u16),
            Constraint::Min(0),
            Constraint::Length(source.len() as u16),
        ])
        .split(area);

    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            LABEL,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            breadcrumb(app),
            Style::default().fg(Color::Gray),
        )),
        cols[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(source, Style::default().fg(Color::DarkGray))),
        cols[2],
    );
}

fn breadcrumb(app: &App) -> String {
    let mut parts = vec!["Activities".to_string()];
    let in_task_scope = matches!(
        app.current_view,
        View::Tasks | View::TimeEntries | View::TaskForm
    ) || app
        .delete_context
        .as_ref()
        .is_some_and(|c| c.origin == View::Tasks);

    if in_task_scope {
        if let Some(activity) = &app.current_activity {
            parts.push(activity.name.clone());
        }
    }
    if app.current_view == View::TimeEntries {
        if let Some(task) = &app.current_task {
            parts.push(task.name.clone());
        }
    }
    format!("  {}", parts.join(" › "))
}

pub fn render_status_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        return;
    };

    let (tag, color) = match status.kind {
        StatusKind::Success => ("OK", Color::Green),
        StatusKind::Error => ("ERROR", Color::Red),
        StatusKind::Warning => ("WARN", Color::Yellow),
        StatusKind::Info => ("INFO", Color::Cyan),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", tag),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", status.text), Style::default().fg(color)),
        Span::styled("  (Ctrl+X to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn controls_for(app: &App) -> &'static [(&'static str, &'static str)] {
    match app.current_view {
        View::Activities if app.editing_name_filter => {
            &[("Enter", "Apply filter"), ("Esc", "Cancel")]
        }
        View::Activities => &[
            ("Enter", "Tasks"),
            ("n", "New"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("f", "Open/finalized"),
            ("/", "Filter"),
            ("r", "Reload"),
            ("q", "Quit"),
        ],
        View::Tasks if app.task_search_active => &[
            ("Type", "Filter"),
            ("↑↓", "Move"),
            ("Enter", "Done"),
            ("Esc", "Clear"),
        ],
        View::Tasks => &[
            ("Enter", "Time entries"),
            ("n", "New"),
            ("e", "Edit"),
            ("c", "Close"),
            ("d", "Delete"),
            ("/", "Search"),
            ("Esc", "Back"),
        ],
        View::TimeEntries => &[
            ("Space", "Start/stop"),
            ("i", "Details"),
            ("r", "Reload"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
        View::ActivityForm => &[
            ("Tab", "Next field"),
            ("Space", "Toggle"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
        View::TaskForm => &[("Enter", "Save"), ("Esc", "Cancel")],
        View::ConfirmDelete => &[("y", "Delete"), ("n", "Keep")],
    }
}

pub fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in controls_for(app) {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!(": {}  ", label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
