use crate::app::{App, DeleteTarget, TextInput, NEW_RECORD_ID};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_activities_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.editing_name_filter {
        handle_name_filter_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Enter => {
            if let Some(activity_id) = app.selected_activity().and_then(|a| a.activity_id) {
                enqueue_action(action_tx, Action::OpenTasks { activity_id });
            }
        }
        KeyCode::Char('n') => {
            enqueue_action(action_tx, Action::OpenActivityForm { id: NEW_RECORD_ID });
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.selected_activity().and_then(|a| a.activity_id) {
                enqueue_action(action_tx, Action::OpenActivityForm { id });
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let target = app.selected_activity().and_then(|a| {
                a.activity_id.map(|id| DeleteTarget::Activity {
                    id,
                    name: a.name.clone(),
                })
            });
            if let Some(target) = target {
                app.request_delete(target);
            }
        }
        KeyCode::Char('f') => {
            app.toggle_finalized_filter();
            enqueue_action(action_tx, Action::LoadActivities);
        }
        KeyCode::Char('/') => {
            app.editing_name_filter = true;
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadActivities),
        _ => {}
    }
}

fn handle_name_filter_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter => {
            app.apply_name_filter();
            enqueue_action(action_tx, Action::LoadActivities);
        }
        KeyCode::Esc => {
            app.editing_name_filter = false;
            app.name_filter_input = TextInput::from_str(&app.activity_filter.name);
        }
        KeyCode::Backspace => app.name_filter_input.backspace(),
        KeyCode::Left => app.name_filter_input.move_left(),
        KeyCode::Right => app.name_filter_input.move_right(),
        KeyCode::Char(c) => app.name_filter_input.insert(c),
        _ => {}
    }
}
