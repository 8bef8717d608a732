use super::utils::{highlight_style, input_spans};
use super::*;
use crate::time_utils::{format_hours, format_minutes, format_timestamp};

pub fn render_task_list(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(body);

    render_activity_summary(frame, app, chunks[0]);
    render_search_bar(frame, app, chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Tasks ({}/{}) ",
            app.filtered_task_indices.len(),
            app.tasks.len()
        ))
        .padding(Padding::horizontal(1));

    if app.filtered_task_indices.is_empty() {
        let message = if app.tasks.is_empty() {
            "No tasks yet. Press n to add one."
        } else {
            "No tasks match the filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
                .block(block),
            chunks[2],
        );
        return;
    }

    let header = Row::new(vec!["Name", "Duration", "Started", "Ended", "State"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows = app.visible_tasks().map(|task| {
        let (state, state_style) = if task.is_closed() {
            ("closed", Style::default().fg(Color::DarkGray))
        } else {
            ("open", Style::default().fg(Color::Green))
        };
        Row::new(vec![
            Cell::from(task.name.clone()),
            Cell::from(format_minutes(task.duration as i64)).style(Style::default().fg(Color::Magenta)),
            Cell::from(format_timestamp(task.start_time)),
            Cell::from(format_timestamp(task.end_time)),
            Cell::from(state).style(state_style),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(17),
            Constraint::Length(17),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight_style())
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.selected_task_index));
    frame.render_stateful_widget(table, chunks[2], &mut state);
}

fn render_activity_summary(frame: &mut Frame, app: &App, area: Rect) {
    let Some(activity) = &app.current_activity else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(
            activity.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   estimate ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_hours(activity.original_estimate)),
        Span::styled("   completed ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_hours(activity.completed_hours)),
        Span::styled("   remaining ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_hours(activity.remaining_hours)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Activity ")),
        area,
    );
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.task_search_active {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::DarkGray))];
    spans.extend(input_spans(&app.task_search_input, app.task_search_active));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Search "),
        ),
        area,
    );
}
