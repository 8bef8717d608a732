use super::utils::centered_rect;
use super::*;

pub fn render_delete_confirm_dialog(frame: &mut Frame, app: &App, body: Rect) {
    let Some(ctx) = &app.delete_context else {
        return;
    };

    // Render the originating view in the background
    render_view(frame, app, ctx.origin, body);

    let area = centered_rect(52, 9, frame.area());
    frame.render_widget(Clear, area);

    let warning = match ctx.target {
        crate::app::DeleteTarget::Activity { .. } => "Its tasks and time entries go with it.",
        crate::app::DeleteTarget::Task { .. } => "Its time entries go with it.",
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            ctx.target.label(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(warning, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete? ")
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
