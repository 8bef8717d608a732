use crate::clock::Clock;
use crate::timer::EntryTimer;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;
use std::time::Instant;
use time::PrimitiveDateTime;
use timetrack_client::{Activity, ActivityFilter, ActivityId, Task, TaskId, TimeEntry};

mod forms;
mod navigation;
mod state;
pub use forms::{
    ActivityField, ActivityForm, ActivitySubmission, TaskForm, TaskSubmission, NEW_RECORD_ID,
};
pub use state::{DeleteContext, DeleteTarget, StatusKind, StatusMessage, TextInput, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status: Option<StatusMessage>,
    /// Label shown next to the title, e.g. the API base URL.
    pub source_label: String,

    // Activity list
    pub activities: Vec<Activity>,
    pub activity_filter: ActivityFilter,
    pub selected_activity_index: usize,
    pub name_filter_input: TextInput,
    pub editing_name_filter: bool,

    // Task list for `current_activity`
    pub current_activity: Option<Activity>,
    pub tasks: Vec<Task>,
    pub task_search_input: TextInput,
    pub task_search_active: bool,
    /// Indices into `tasks` that match the quick filter, best match first.
    pub filtered_task_indices: Vec<usize>,
    pub selected_task_index: usize,

    // Time entries for `current_task`
    pub current_task: Option<Task>,
    pub time_entries: Vec<TimeEntry>,
    pub selected_entry_index: usize,
    pub timer: EntryTimer,

    // Forms and dialogs
    pub activity_form: Option<ActivityForm>,
    pub task_form: Option<TaskForm>,
    pub delete_context: Option<DeleteContext>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    clock: Arc<dyn Clock>,
}

impl App {
    pub fn new(clock: Arc<dyn Clock>, source_label: impl Into<String>) -> Self {
        Self {
            running: true,
            current_view: View::Activities,
            status: None,
            source_label: source_label.into(),
            activities: Vec::new(),
            activity_filter: ActivityFilter::default(),
            selected_activity_index: 0,
            name_filter_input: TextInput::new(),
            editing_name_filter: false,
            current_activity: None,
            tasks: Vec::new(),
            task_search_input: TextInput::new(),
            task_search_active: false,
            filtered_task_indices: Vec::new(),
            selected_task_index: 0,
            current_task: None,
            time_entries: Vec::new(),
            selected_entry_index: 0,
            timer: EntryTimer::default(),
            activity_form: None,
            task_form: None,
            delete_context: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            clock,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Current wall-clock time in the API's naive local time.
    pub fn now(&self) -> PrimitiveDateTime {
        self.clock.now()
    }

    pub fn navigate_to(&mut self, view: View) {
        if self.current_view == View::TimeEntries && view != View::TimeEntries {
            // Leaving the timer view must not leave ticks behind.
            self.timer.disarm();
        }
        self.current_view = view;
        self.clear_status();
    }

    // Status banner

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    // Activities

    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        self.selected_activity_index = self
            .selected_activity_index
            .min(self.activities.len().saturating_sub(1));
    }

    pub fn selected_activity(&self) -> Option<&Activity> {
        self.activities.get(self.selected_activity_index)
    }

    /// Drop one activity from the rendered list after the server deleted it.
    pub fn remove_activity(&mut self, id: ActivityId) {
        self.activities.retain(|a| a.activity_id != Some(id));
        self.selected_activity_index = self
            .selected_activity_index
            .min(self.activities.len().saturating_sub(1));
    }

    pub fn toggle_finalized_filter(&mut self) {
        self.activity_filter.finalized = !self.activity_filter.finalized;
        self.selected_activity_index = 0;
    }

    pub fn apply_name_filter(&mut self) {
        self.activity_filter.name = self.name_filter_input.value.trim().to_string();
        self.editing_name_filter = false;
        self.selected_activity_index = 0;
    }

    // Tasks

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.filter_tasks();
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.filtered_task_indices
            .get(self.selected_task_index)
            .and_then(|&i| self.tasks.get(i))
    }

    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.filtered_task_indices
            .iter()
            .filter_map(|&i| self.tasks.get(i))
    }

    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.task_id != Some(id));
        self.filter_tasks();
    }

    /// Re-apply the quick filter over the loaded tasks using fuzzy matching.
    pub fn filter_tasks(&mut self) {
        let query = self.task_search_input.value.trim();
        if query.is_empty() {
            self.filtered_task_indices = (0..self.tasks.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(usize, i64)> = self
                .tasks
                .iter()
                .enumerate()
                .filter_map(|(i, task)| matcher.fuzzy_match(&task.name, query).map(|s| (i, s)))
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            self.filtered_task_indices = scored.into_iter().map(|(i, _)| i).collect();
        }
        self.selected_task_index = self
            .selected_task_index
            .min(self.filtered_task_indices.len().saturating_sub(1));
    }

    pub fn task_search_char(&mut self, c: char) {
        self.task_search_input.insert(c);
        self.selected_task_index = 0;
        self.filter_tasks();
    }

    pub fn task_search_backspace(&mut self) {
        self.task_search_input.backspace();
        self.filter_tasks();
    }

    pub fn task_search_clear(&mut self) {
        self.task_search_input.clear();
        self.task_search_active = false;
        self.filter_tasks();
    }

    // Time entries

    /// Store the entry list and rebuild the timer from the playing entry.
    pub fn apply_time_entries(
        &mut self,
        entries: Vec<TimeEntry>,
        playing: Option<&TimeEntry>,
        at: Instant,
    ) {
        self.time_entries = entries;
        self.selected_entry_index = self
            .selected_entry_index
            .min(self.time_entries.len().saturating_sub(1));
        let now = self.now();
        self.timer.reconcile(playing, now, at);
    }

    pub fn set_time_entries(&mut self, entries: Vec<TimeEntry>) {
        self.time_entries = entries;
        self.selected_entry_index = self
            .selected_entry_index
            .min(self.time_entries.len().saturating_sub(1));
    }

    pub fn current_task_id(&self) -> Option<TaskId> {
        self.current_task.as_ref().and_then(|t| t.task_id)
    }

    pub fn current_activity_id(&self) -> Option<ActivityId> {
        self.current_activity.as_ref().and_then(|a| a.activity_id)
    }

    // Delete confirmation

    pub fn request_delete(&mut self, target: DeleteTarget) {
        let origin = self.current_view;
        self.delete_context = Some(DeleteContext { target, origin });
        self.navigate_to(View::ConfirmDelete);
    }

    /// Close the dialog and return to whichever view opened it.
    pub fn cancel_delete(&mut self) {
        let origin = self
            .delete_context
            .take()
            .map(|c| c.origin)
            .unwrap_or(View::Activities);
        self.navigate_to(origin);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::clock::ManualClock;
    use time::macros::datetime;

    pub fn activity(id: ActivityId, name: &str) -> Activity {
        Activity {
            activity_id: Some(id),
            name: name.to_string(),
            original_estimate: 5.0,
            remaining_hours: 5.0,
            completed_hours: 0.0,
            finalized: Some(false),
            price_per_hour: None,
            money_received: None,
        }
    }

    pub fn task(id: TaskId, activity_id: ActivityId, name: &str) -> Task {
        Task {
            task_id: Some(id),
            activity_id,
            name: name.to_string(),
            start_time: None,
            end_time: None,
            duration: 0.0,
            closed: Some(false),
        }
    }

    pub fn test_app() -> App {
        let clock = ManualClock::new(datetime!(2024-03-01 09:00));
        App::new(Arc::new(clock), "test")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn removing_activity_keeps_the_others() {
        let mut app = test_app();
        app.set_activities(vec![
            activity(1, "Write report"),
            activity(2, "Website refresh"),
            activity(3, "Tax return"),
        ]);
        app.selected_activity_index = 2;

        app.remove_activity(2);

        let ids: Vec<_> = app.activities.iter().filter_map(|a| a.activity_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(app.selected_activity_index, 1);
    }

    #[test]
    fn quick_filter_matches_fuzzily() {
        let mut app = test_app();
        app.set_tasks(vec![
            task(1, 1, "Draft"),
            task(2, 1, "Review"),
            task(3, 1, "Proofread draft"),
        ]);

        for c in "drft".chars() {
            app.task_search_char(c);
        }
        let names: Vec<_> = app.visible_tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Draft"));
        assert!(!names.contains(&"Review"));

        app.task_search_clear();
        assert_eq!(app.visible_tasks().count(), 3);
    }

    #[test]
    fn leaving_time_entries_disarms_timer() {
        let mut app = test_app();
        app.current_view = View::TimeEntries;
        let entry = TimeEntry {
            time_entry_id: Some(1),
            task_id: 1,
            start_time: app.now(),
            end_time: None,
        };
        app.apply_time_entries(vec![entry.clone()], Some(&entry), Instant::now());
        assert!(app.timer.is_armed());

        app.navigate_to(View::Tasks);
        assert!(!app.timer.is_armed());
        assert!(app.timer.is_running());
    }

    #[test]
    fn cancel_delete_returns_to_origin() {
        let mut app = test_app();
        app.current_view = View::Tasks;
        app.request_delete(DeleteTarget::Task {
            id: 4,
            name: "Draft".to_string(),
        });
        assert_eq!(app.current_view, View::ConfirmDelete);

        app.cancel_delete();
        assert_eq!(app.current_view, View::Tasks);
        assert!(app.delete_context.is_none());
    }
}
