use super::utils::{highlight_style, input_spans};
use super::*;
use crate::time_utils::format_hours;

pub fn render_activity_list(frame: &mut Frame, app: &App, body: Rect) {
    let show_filter_bar = app.editing_name_filter || !app.activity_filter.name.is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if show_filter_bar {
            vec![Constraint::Length(3), Constraint::Min(0)]
        } else {
            vec![Constraint::Length(0), Constraint::Min(0)]
        })
        .split(body);

    if show_filter_bar {
        let mut spans = vec![Span::styled("Name: ", Style::default().fg(Color::DarkGray))];
        spans.extend(input_spans(&app.name_filter_input, app.editing_name_filter));
        let border = if app.editing_name_filter {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(" Filter "),
            ),
            chunks[0],
        );
    }

    let scope = if app.activity_filter.finalized {
        "finalized"
    } else {
        "open"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Activities ({}) ", scope))
        .padding(Padding::horizontal(1));

    if app.activities.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No activities. Press n to create one.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let header = Row::new(vec!["Name", "Estimate", "Completed", "Remaining", "Paid"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows = app.activities.iter().map(|activity| {
        let remaining_style = if activity.remaining_hours < 0.0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let paid = match activity.money_received {
            Some(true) => "yes",
            _ => "",
        };
        Row::new(vec![
            Cell::from(activity.name.clone()),
            Cell::from(format_hours(activity.original_estimate)),
            Cell::from(format_hours(activity.completed_hours)),
            Cell::from(format_hours(activity.remaining_hours)).style(remaining_style),
            Cell::from(paid),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight_style())
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.selected_activity_index));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}
