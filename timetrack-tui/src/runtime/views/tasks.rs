use crate::app::{App, DeleteTarget, View, NEW_RECORD_ID};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_tasks_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.task_search_active {
        match key.code {
            KeyCode::Esc => app.task_search_clear(),
            KeyCode::Enter => app.task_search_active = false,
            KeyCode::Backspace => app.task_search_backspace(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Char(c) => app.task_search_char(c),
            _ => {}
        }
        return;
    }

    let selected_id = app.selected_task().and_then(|t| t.task_id);
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.navigate_to(View::Activities);
            enqueue_action(action_tx, Action::LoadActivities);
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Enter => {
            if let Some(task_id) = selected_id {
                enqueue_action(action_tx, Action::OpenTimeEntries { task_id });
            }
        }
        KeyCode::Char('n') => {
            enqueue_action(action_tx, Action::OpenTaskForm { id: NEW_RECORD_ID });
        }
        KeyCode::Char('e') => {
            if let Some(id) = selected_id {
                enqueue_action(action_tx, Action::OpenTaskForm { id });
            }
        }
        KeyCode::Char('c') => {
            if let Some(id) = selected_id {
                enqueue_action(action_tx, Action::CloseTask { id });
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let target = app.selected_task().and_then(|t| {
                t.task_id.map(|id| DeleteTarget::Task {
                    id,
                    name: t.name.clone(),
                })
            });
            if let Some(target) = target {
                app.request_delete(target);
            }
        }
        KeyCode::Char('/') => app.task_search_active = true,
        KeyCode::Char('r') => enqueue_action(action_tx, Action::ReloadTasks),
        _ => {}
    }
}
