use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_time_entries_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Enter => {
            enqueue_action(action_tx, Action::ToggleTimer);
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::ReloadTimeEntries),
        KeyCode::Char('i') => {
            if let Some(id) = app
                .time_entries
                .get(app.selected_entry_index)
                .and_then(|e| e.time_entry_id)
            {
                enqueue_action(action_tx, Action::InspectEntry { id });
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.navigate_to(View::Tasks);
            enqueue_action(action_tx, Action::ReloadTasks);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use crossterm::event::KeyModifiers;
    use std::time::Instant;
    use timetrack_client::TimeEntry;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_time_entries_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn space_toggles_timer() {
        let mut app = test_app();
        app.current_view = View::TimeEntries;
        assert_eq!(press(&mut app, KeyCode::Char(' ')), Some(Action::ToggleTimer));
    }

    #[test]
    fn leaving_view_stops_ticking() {
        let mut app = test_app();
        app.current_view = View::TimeEntries;
        let entry = TimeEntry {
            time_entry_id: Some(3),
            task_id: 1,
            start_time: app.now(),
            end_time: None,
        };
        app.apply_time_entries(vec![entry.clone()], Some(&entry), Instant::now());

        assert_eq!(press(&mut app, KeyCode::Esc), Some(Action::ReloadTasks));
        assert_eq!(app.current_view, View::Tasks);
        assert!(!app.timer.is_armed());
    }
}
