use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Padding, Paragraph, Row, Table, TableState},
    Frame,
};

mod activity_list;
mod delete_dialog;
mod form_view;
mod task_list;
mod time_entries_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    widgets::render_header(frame, root[0], app);

    let body = root[1];
    if app.current_view == View::ConfirmDelete {
        delete_dialog::render_delete_confirm_dialog(frame, app, body);
    } else {
        render_view(frame, app, app.current_view, body);
    }

    widgets::render_status_banner(frame, root[2], app);
    widgets::render_controls(frame, root[3], app);
}

/// Draw one view into `body`. Forms are drawn on top of the list they
/// belong to.
fn render_view(frame: &mut Frame, app: &App, view: View, body: Rect) {
    match view {
        View::Activities => activity_list::render_activity_list(frame, app, body),
        View::Tasks => task_list::render_task_list(frame, app, body),
        View::TimeEntries => time_entries_view::render_time_entries_view(frame, app, body),
        View::ActivityForm => {
            activity_list::render_activity_list(frame, app, body);
            if let Some(form) = &app.activity_form {
                form_view::render_activity_form(frame, form, body);
            }
        }
        View::TaskForm => {
            task_list::render_task_list(frame, app, body);
            if let Some(form) = &app.task_form {
                form_view::render_task_form(frame, form, body);
            }
        }
        View::ConfirmDelete => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{activity, task, test_app};
    use crate::app::{ActivityForm, DeleteTarget, StatusKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;
    use timetrack_client::TimeEntry;

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn activity_list_shows_rows_and_hours() {
        let mut app = test_app();
        let mut report = activity(1, "Write report");
        report.completed_hours = 1.25;
        report.remaining_hours = 3.75;
        app.set_activities(vec![report, activity(2, "Tax return")]);

        let screen = draw(&mut app);
        assert!(screen.contains("Activities (open)"));
        assert!(screen.contains("Write report"));
        assert!(screen.contains("3.75"));
        assert!(screen.contains("Tax return"));
    }

    #[test]
    fn time_entries_view_shows_running_timer() {
        let mut app = test_app();
        app.current_view = View::TimeEntries;
        app.current_task = Some(task(2, 1, "Draft"));
        let start = app.now() - time::Duration::minutes(17);
        let entry = TimeEntry {
            time_entry_id: Some(8),
            task_id: 2,
            start_time: start,
            end_time: None,
        };
        app.apply_time_entries(vec![entry.clone()], Some(&entry), Instant::now());

        let screen = draw(&mut app);
        assert!(screen.contains("RUNNING"));
        assert!(screen.contains("00h:17m"));
        assert!(screen.contains("running"));
    }

    #[test]
    fn form_and_status_banner_render() {
        let mut app = test_app();
        app.current_view = View::ActivityForm;
        app.activity_form = Some(ActivityForm::default());
        app.set_status(StatusKind::Warning, "Name is required");

        let screen = draw(&mut app);
        assert!(screen.contains("New Activity"));
        assert!(screen.contains("Original estimate"));
        assert!(screen.contains("Name is required"));
    }

    #[test]
    fn delete_dialog_names_target() {
        let mut app = test_app();
        app.set_activities(vec![activity(1, "Write report")]);
        app.request_delete(DeleteTarget::Activity {
            id: 1,
            name: "Write report".to_string(),
        });

        let screen = draw(&mut app);
        assert!(screen.contains("Delete?"));
        assert!(screen.contains("Activity: Write report"));
    }
}
