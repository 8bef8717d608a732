use std::sync::{Arc, Mutex};
use time::{Duration, PrimitiveDateTime};
use timetrack_client::{
    Activity, ActivityCreate, ActivityFilter, ActivityId, ActivityUpdate, ApiError, Task,
    TaskCreate, TaskId, TaskUpdate, TimeEntry, TimeEntryId,
};

use crate::clock::Clock;

/// In-memory stand-in for the API, keeping the same bookkeeping the server
/// does (task duration from entries, activity hours from tasks).
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Default)]
struct DevStore {
    activities: Vec<Activity>,
    tasks: Vec<Task>,
    entries: Vec<DevEntry>,
    next_id: i64,
}

#[derive(Debug, Clone)]
struct DevEntry {
    entry: TimeEntry,
    duration_seconds: Option<f64>,
}

impl DevStore {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn activity_mut(&mut self, id: ActivityId) -> Option<&mut Activity> {
        self.activities
            .iter_mut()
            .find(|a| a.activity_id == Some(id))
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.task_id == Some(id))
    }

    fn is_activity_finalized(&self, id: ActivityId) -> bool {
        self.activities
            .iter()
            .find(|a| a.activity_id == Some(id))
            .is_some_and(Activity::is_finalized)
    }

    fn refresh_task_duration(&mut self, task_id: TaskId) {
        let seconds: f64 = self
            .entries
            .iter()
            .filter(|e| e.entry.task_id == task_id)
            .filter_map(|e| e.duration_seconds)
            .sum();

        let Some(task) = self.task_mut(task_id) else {
            return;
        };
        task.duration = (seconds / 60.0).floor();
        let activity_id = task.activity_id;
        self.refresh_activity_hours(activity_id);
    }

    fn refresh_activity_hours(&mut self, activity_id: ActivityId) {
        let minutes: f64 = self
            .tasks
            .iter()
            .filter(|t| t.activity_id == activity_id)
            .map(|t| t.duration)
            .sum();

        if let Some(activity) = self.activity_mut(activity_id) {
            let completed = minutes / 60.0;
            activity.completed_hours = round2(completed);
            activity.remaining_hours = round2(activity.original_estimate - completed);
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn not_found(call: &str, detail: &str) -> ApiError {
    ApiError::NotFound {
        call: call.to_string(),
        detail: Some(detail.to_string()),
    }
}

fn bad_request(call: &str, detail: &str) -> ApiError {
    ApiError::Rejected {
        call: call.to_string(),
        status: 400,
        detail: Some(detail.to_string()),
    }
}

impl DevBackend {
    /// Backend pre-populated with a few activities, tasks and entries.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let backend = Self::empty(clock);
        backend.seed();
        backend
    }

    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore::default())),
            clock,
        }
    }

    fn store(&self) -> std::sync::MutexGuard<'_, DevStore> {
        self.store.lock().expect("dev store lock poisoned")
    }

    fn seed(&self) {
        let now = self.clock.now();
        let mut store = self.store();

        let seeded = [
            ("Write report", 5.0, vec![("Draft", vec![(120, 45), (60, 30)]), ("Review", vec![])]),
            ("Website refresh", 12.0, vec![("Landing page", vec![(30, 25)])]),
            ("Tax return", 3.0, vec![]),
        ];

        for (name, estimate, tasks) in seeded {
            let activity_id = store.next_id();
            store.activities.push(Activity {
                activity_id: Some(activity_id),
                name: name.to_string(),
                original_estimate: estimate,
                remaining_hours: estimate,
                completed_hours: 0.0,
                finalized: Some(false),
                price_per_hour: None,
                money_received: Some(false),
            });

            for (task_name, entries) in tasks {
                let task_id = store.next_id();
                let first_start = entries
                    .iter()
                    .map(|(ago, _)| now - Duration::minutes(*ago))
                    .min();
                store.tasks.push(Task {
                    task_id: Some(task_id),
                    activity_id,
                    name: task_name.to_string(),
                    start_time: first_start,
                    end_time: None,
                    duration: 0.0,
                    closed: Some(false),
                });

                for (minutes_ago, length) in entries {
                    let start = now - Duration::minutes(minutes_ago);
                    let end = start + Duration::minutes(length);
                    let id = store.next_id();
                    store.entries.push(DevEntry {
                        entry: TimeEntry {
                            time_entry_id: Some(id),
                            task_id,
                            start_time: start,
                            end_time: Some(end),
                        },
                        duration_seconds: Some((end - start).as_seconds_f64()),
                    });
                }
                store.refresh_task_duration(task_id);
            }
        }
    }

    // Activities

    /// Name matching is a case-insensitive substring match, like the server's
    /// `LIKE` query.
    pub fn list_activities(&self, filter: &ActivityFilter) -> Vec<Activity> {
        let needle = filter.name.to_lowercase();
        self.store()
            .activities
            .iter()
            .filter(|a| {
                a.is_finalized() == filter.finalized && a.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn get_activity(&self, id: ActivityId) -> Result<Activity, ApiError> {
        self.store()
            .activity_mut(id)
            .cloned()
            .ok_or_else(|| not_found("GET /api/activities/:id/", "Activity not found"))
    }

    pub fn create_activity(&self, body: &ActivityCreate) -> Activity {
        let mut store = self.store();
        let activity = Activity {
            activity_id: Some(store.next_id()),
            name: body.name.clone(),
            original_estimate: body.original_estimate,
            remaining_hours: body.original_estimate,
            completed_hours: 0.0,
            finalized: Some(false),
            price_per_hour: None,
            money_received: None,
        };
        store.activities.push(activity.clone());
        activity
    }

    pub fn update_activity(
        &self,
        id: ActivityId,
        body: &ActivityUpdate,
    ) -> Result<Activity, ApiError> {
        let mut store = self.store();
        let activity = store
            .activity_mut(id)
            .ok_or_else(|| not_found("PUT /api/activities/:id/", "Activity not found"))?;

        activity.name = body.name.clone();
        activity.original_estimate = body.original_estimate;
        activity.completed_hours = body.completed_hours;
        activity.finalized = Some(body.finalized);
        activity.price_per_hour = Some(body.price_per_hour);
        activity.money_received = Some(body.money_received);
        Ok(activity.clone())
    }

    pub fn delete_activity(&self, id: ActivityId) -> Result<(), ApiError> {
        let mut store = self.store();
        if store.activity_mut(id).is_none() {
            return Err(not_found("DELETE /api/activities/:id/", "Activity not found"));
        }

        let task_ids: Vec<TaskId> = store
            .tasks
            .iter()
            .filter(|t| t.activity_id == id)
            .filter_map(|t| t.task_id)
            .collect();
        store.entries.retain(|e| !task_ids.contains(&e.entry.task_id));
        store.tasks.retain(|t| t.activity_id != id);
        store.activities.retain(|a| a.activity_id != Some(id));
        Ok(())
    }

    // Tasks

    pub fn list_tasks(&self, activity_id: ActivityId) -> Vec<Task> {
        self.store()
            .tasks
            .iter()
            .filter(|t| t.activity_id == activity_id)
            .cloned()
            .collect()
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.store()
            .task_mut(id)
            .cloned()
            .ok_or_else(|| not_found("GET /api/tasks/:id/", "Task not found"))
    }

    pub fn create_task(&self, body: &TaskCreate) -> Result<Task, ApiError> {
        const CALL: &str = "POST /api/tasks/";
        let mut store = self.store();
        if store.activity_mut(body.activity_id).is_none() {
            return Err(not_found(CALL, "Activity not found"));
        }
        if store.is_activity_finalized(body.activity_id) {
            return Err(bad_request(
                CALL,
                "You can't create a task with finalized activity",
            ));
        }

        let task = Task {
            task_id: Some(store.next_id()),
            activity_id: body.activity_id,
            name: body.name.clone(),
            start_time: None,
            end_time: None,
            duration: 0.0,
            closed: None,
        };
        store.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update_task(&self, id: TaskId, body: &TaskUpdate) -> Result<Task, ApiError> {
        let mut store = self.store();
        let task = store
            .task_mut(id)
            .ok_or_else(|| not_found("PUT /api/tasks/:id/", "Task not found"))?;
        task.name = body.name.clone();
        Ok(task.clone())
    }

    pub fn close_task(&self, id: TaskId) -> Result<Task, ApiError> {
        let now = self.clock.now();
        let mut store = self.store();
        let task = store
            .task_mut(id)
            .ok_or_else(|| not_found("PUT /api/tasks/close/:id/", "Task not found"))?;
        task.end_time = Some(now);
        task.closed = Some(true);
        Ok(task.clone())
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        const CALL: &str = "DELETE /api/tasks/:id/";
        let mut store = self.store();
        let activity_id = store
            .task_mut(id)
            .map(|t| t.activity_id)
            .ok_or_else(|| not_found(CALL, "Task not found"))?;
        if store.is_activity_finalized(activity_id) {
            return Err(bad_request(
                CALL,
                "You can't delete a task with finalized activity",
            ));
        }

        store.entries.retain(|e| e.entry.task_id != id);
        store.tasks.retain(|t| t.task_id != Some(id));
        store.refresh_activity_hours(activity_id);
        Ok(())
    }

    // Time entries

    pub fn list_time_entries(&self, task_id: TaskId) -> Vec<TimeEntry> {
        self.store()
            .entries
            .iter()
            .filter(|e| e.entry.task_id == task_id)
            .map(|e| e.entry.clone())
            .collect()
    }

    pub fn playing_time_entry(&self, task_id: TaskId) -> Option<TimeEntry> {
        self.store()
            .entries
            .iter()
            .find(|e| e.entry.task_id == task_id && e.entry.is_running())
            .map(|e| e.entry.clone())
    }

    pub fn get_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        self.store()
            .entries
            .iter()
            .find(|e| e.entry.time_entry_id == Some(id))
            .map(|e| e.entry.clone())
            .ok_or_else(|| not_found("GET /api/time_entries/:id/", "Time Entry not found"))
    }

    pub fn start_time_entry(&self, task_id: TaskId) -> Result<TimeEntry, ApiError> {
        const CALL: &str = "POST /api/time_entries/:id/start";
        let now = self.clock.now();
        let mut store = self.store();

        let (closed, activity_id) = store
            .task_mut(task_id)
            .map(|t| (t.is_closed(), t.activity_id))
            .ok_or_else(|| not_found(CALL, "Task not found"))?;
        if closed {
            return Err(bad_request(CALL, "Task closed"));
        }
        if store.is_activity_finalized(activity_id) {
            return Err(bad_request(
                CALL,
                "You can't start a task with finalized activity",
            ));
        }

        let entry = TimeEntry {
            time_entry_id: Some(store.next_id()),
            task_id,
            start_time: now,
            end_time: None,
        };
        store.entries.push(DevEntry {
            entry: entry.clone(),
            duration_seconds: None,
        });
        if let Some(task) = store.task_mut(task_id) {
            if task.start_time.is_none() {
                task.start_time = Some(now);
            }
        }
        Ok(entry)
    }

    pub fn stop_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        let now: PrimitiveDateTime = self.clock.now();
        let mut store = self.store();

        let dev_entry = store
            .entries
            .iter_mut()
            .find(|e| e.entry.time_entry_id == Some(id))
            .ok_or_else(|| not_found("PUT /api/time_entries/:id/stop", "Time Entry not found"))?;
        dev_entry.entry.end_time = Some(now);
        dev_entry.duration_seconds = Some((now - dev_entry.entry.start_time).as_seconds_f64());
        let entry = dev_entry.entry.clone();

        store.refresh_task_duration(entry.task_id);
        Ok(entry)
    }
}
