use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod activities;
mod activity_form;
mod confirm_delete;
mod task_form;
mod tasks;
mod time_entries;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.quit();
                return;
            }
            KeyCode::Char('x') => {
                app.clear_status();
                return;
            }
            _ => {}
        }
    }

    match app.current_view {
        View::Activities => activities::handle_activities_key(key, app, action_tx),
        View::Tasks => tasks::handle_tasks_key(key, app, action_tx),
        View::TimeEntries => time_entries::handle_time_entries_key(key, app, action_tx),
        View::ActivityForm => activity_form::handle_activity_form_key(key, app, action_tx),
        View::TaskForm => task_form::handle_task_form_key(key, app, action_tx),
        View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use crate::app::StatusKind;

    use super::super::action_queue::channel;

    #[test]
    fn ctrl_x_dismisses_status() {
        let mut app = test_app();
        app.set_status(StatusKind::Error, "Failed to load activities");
        let (tx, _rx) = channel();

        handle_view_key(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );

        assert!(app.status.is_none());
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut app = test_app();
        app.current_view = View::TaskForm;
        let (tx, _rx) = channel();

        handle_view_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );

        assert!(!app.running);
    }
}
