use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_task_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.task_form.as_mut() else {
        app.navigate_to(View::Tasks);
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.task_form = None;
            app.navigate_to(View::Tasks);
        }
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitTaskForm),
        KeyCode::Char(c) => form.name.insert(c),
        KeyCode::Backspace => form.name.backspace(),
        KeyCode::Left => form.name.move_left(),
        KeyCode::Right => form.name.move_right(),
        KeyCode::Home => form.name.home(),
        KeyCode::End => form.name.end(),
        _ => {}
    }
}
