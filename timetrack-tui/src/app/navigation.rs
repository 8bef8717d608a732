use super::*;

impl App {
    /// Move the selection in the current list view down one row.
    pub fn select_next(&mut self) {
        match self.current_view {
            View::Activities => {
                step_down(&mut self.selected_activity_index, self.activities.len())
            }
            View::Tasks => step_down(
                &mut self.selected_task_index,
                self.filtered_task_indices.len(),
            ),
            View::TimeEntries => {
                step_down(&mut self.selected_entry_index, self.time_entries.len())
            }
            _ => {}
        }
    }

    /// Move the selection in the current list view up one row.
    pub fn select_previous(&mut self) {
        match self.current_view {
            View::Activities => step_up(&mut self.selected_activity_index),
            View::Tasks => step_up(&mut self.selected_task_index),
            View::TimeEntries => step_up(&mut self.selected_entry_index),
            _ => {}
        }
    }
}

fn step_down(index: &mut usize, len: usize) {
    if len > 0 && *index + 1 < len {
        *index += 1;
    }
}

fn step_up(index: &mut usize) {
    *index = index.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = test_app();
        app.set_activities(vec![activity(1, "A"), activity(2, "B")]);

        app.select_next();
        app.select_next();
        assert_eq!(app.selected_activity_index, 1);

        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected_activity_index, 0);
    }

    #[test]
    fn task_selection_follows_filtered_rows() {
        let mut app = test_app();
        app.current_view = View::Tasks;
        app.set_tasks(vec![task(1, 1, "Draft"), task(2, 1, "Review")]);
        app.task_search_char('r');
        app.task_search_char('e');
        app.task_search_char('v');

        app.select_next();
        assert_eq!(app.selected_task().map(|t| t.name.as_str()), Some("Review"));
    }
}
