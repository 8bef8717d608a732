use super::utils::highlight_style;
use super::*;
use crate::time_utils::{format_minutes, format_timestamp};

pub fn render_time_entries_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(body);

    render_timer_box(frame, app, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Time entries ({}) ", app.time_entries.len()))
        .padding(Padding::horizontal(1));

    if app.time_entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No time logged yet. Press Space to start.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            chunks[1],
        );
        return;
    }

    let header = Row::new(vec!["#", "Start", "End", "Duration"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows = app.time_entries.iter().map(|entry| {
        let id = entry
            .time_entry_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let (end, duration) = match entry.duration_minutes() {
            Some(minutes) => (format_timestamp(entry.end_time), format_minutes(minutes)),
            None => ("running".to_string(), String::new()),
        };
        let style = if entry.is_running() {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(id),
            Cell::from(format_timestamp(Some(entry.start_time))),
            Cell::from(end),
            Cell::from(duration).style(Style::default().fg(Color::Magenta)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(17),
            Constraint::Length(17),
            Constraint::Min(9),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight_style())
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.selected_entry_index));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_timer_box(frame: &mut Frame, app: &App, area: Rect) {
    let task_name = app
        .current_task
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();
    let logged = app
        .current_task
        .as_ref()
        .map(|t| format_minutes(t.duration as i64))
        .unwrap_or_default();

    let (state_label, state_color) = if app.timer.is_running() {
        ("● RUNNING", Color::Green)
    } else {
        ("■ STOPPED", Color::DarkGray)
    };
    let elapsed = format_minutes(app.timer.elapsed_minutes() as i64);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                state_label,
                Style::default()
                    .fg(state_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                elapsed,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Logged on task: ", Style::default().fg(Color::DarkGray)),
            Span::styled(logged, Style::default().fg(Color::Magenta)),
        ]),
    ];

    let border = if app.timer.is_armed() {
        Color::Green
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", task_name))
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}
