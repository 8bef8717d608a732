use super::utils::{centered_rect, input_spans};
use super::*;
use crate::app::{ActivityField, ActivityForm, TaskForm};

pub fn render_activity_form(frame: &mut Frame, form: &ActivityForm, body: Rect) {
    let fields = form.fields();
    let height = fields.len() as u16 + 6;
    let area = centered_rect(60, height, body);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for &field in fields {
        let focused = form.focused == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{:<22}", field.label()), label_style)];
        spans.extend(field_value_spans(form, field, focused));
        lines.push(Line::from(spans));
    }

    let title = if form.is_new() {
        " New Activity ".to_string()
    } else {
        format!(" Edit Activity #{} ", form.id)
    };
    render_form_box(frame, area, title, lines);
}

fn field_value_spans(form: &ActivityForm, field: ActivityField, focused: bool) -> Vec<Span<'static>> {
    if let Some(input) = form.input(field) {
        return input_spans(input, focused);
    }
    match form.toggle(field) {
        Some(on) => vec![Span::styled(
            if on { "[x]" } else { "[ ]" },
            if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        )],
        None => Vec::new(),
    }
}

pub fn render_task_form(frame: &mut Frame, form: &TaskForm, body: Rect) {
    let area = centered_rect(60, 7, body);
    frame.render_widget(Clear, area);

    let mut name = vec![Span::styled(
        format!("{:<22}", "Name"),
        Style::default().fg(Color::Yellow),
    )];
    name.extend(input_spans(&form.name, true));
    let lines = vec![Line::from(""), Line::from(name)];

    let title = if form.is_new() {
        " New Task ".to_string()
    } else {
        format!(" Edit Task #{} ", form.id)
    };
    render_form_box(frame, area, title, lines);
}

fn render_form_box(frame: &mut Frame, area: Rect, title: String, mut lines: Vec<Line<'static>>) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Save  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(title, Style::default().fg(Color::Yellow)))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}
