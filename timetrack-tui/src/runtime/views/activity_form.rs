use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_activity_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.activity_form.as_mut() else {
        app.navigate_to(View::Activities);
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.activity_form = None;
            app.navigate_to(View::Activities);
        }
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitActivityForm),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Char(' ') if form.focused.is_toggle() => form.toggle_focused(),
        KeyCode::Char(c) => {
            if let Some(input) = form.focused_input_mut() {
                input.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = form.focused_input_mut() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = form.focused_input_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = form.focused_input_mut() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = form.focused_input_mut() {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input_mut() {
                input.end();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{activity, test_app};
    use crate::app::{ActivityField, ActivityForm};
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_activity_form_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut app = test_app();
        app.current_view = View::ActivityForm;
        app.activity_form = Some(ActivityForm::default());

        for c in "Report".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('5'));

        let form = app.activity_form.as_ref().unwrap();
        assert_eq!(form.name.value, "Report");
        assert_eq!(form.original_estimate.value, "5");
        assert_eq!(press(&mut app, KeyCode::Enter), Some(Action::SubmitActivityForm));
    }

    #[test]
    fn space_flips_toggle_fields() {
        let mut app = test_app();
        let mut form = ActivityForm::from_activity(&activity(2, "Write report"));
        form.focused = ActivityField::MoneyReceived;
        app.activity_form = Some(form);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.activity_form.as_ref().unwrap().money_received);
    }

    #[test]
    fn esc_discards_form() {
        let mut app = test_app();
        app.current_view = View::ActivityForm;
        app.activity_form = Some(ActivityForm::default());

        press(&mut app, KeyCode::Esc);
        assert!(app.activity_form.is_none());
        assert_eq!(app.current_view, View::Activities);
    }
}
