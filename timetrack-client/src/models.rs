use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

pub type ActivityId = i64;
pub type TaskId = i64;
pub type TimeEntryId = i64;

/// Top-level unit of tracked work. `activity_id` is `None` only before the
/// first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_id: Option<ActivityId>,
    pub name: String,
    pub original_estimate: f64,
    #[serde(default)]
    pub remaining_hours: f64,
    #[serde(default)]
    pub completed_hours: f64,
    #[serde(default)]
    pub finalized: Option<bool>,
    #[serde(default)]
    pub price_per_hour: Option<f64>,
    #[serde(default)]
    pub money_received: Option<bool>,
}

impl Activity {
    pub fn is_finalized(&self) -> bool {
        self.finalized.unwrap_or(false)
    }
}

/// A unit of work under an activity. `duration` is in whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: Option<TaskId>,
    pub activity_id: ActivityId,
    pub name: String,
    #[serde(default, with = "crate::datetime::option")]
    pub start_time: Option<PrimitiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub end_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub closed: Option<bool>,
}

impl Task {
    pub fn is_closed(&self) -> bool {
        self.closed.unwrap_or(false)
    }
}

/// One start/stop interval on a task. An absent `end_time` marks the
/// currently running entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub time_entry_id: Option<TimeEntryId>,
    pub task_id: TaskId,
    #[serde(with = "crate::datetime")]
    pub start_time: PrimitiveDateTime,
    #[serde(default, with = "crate::datetime::option")]
    pub end_time: Option<PrimitiveDateTime>,
}

impl TimeEntry {
    pub fn is_running(&self) -> bool {
        self.end_time.is_none()
    }

    /// Whole minutes between start and end; `None` while running.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).whole_minutes().max(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityCreate {
    pub name: String,
    pub original_estimate: f64,
}

/// Full replacement body for `PUT /api/activities/{id}/`; the API requires
/// every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityUpdate {
    pub name: String,
    pub original_estimate: f64,
    pub completed_hours: f64,
    pub finalized: bool,
    pub price_per_hour: f64,
    pub money_received: bool,
}

impl From<&Activity> for ActivityUpdate {
    fn from(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone(),
            original_estimate: activity.original_estimate,
            completed_hours: activity.completed_hours,
            finalized: activity.is_finalized(),
            price_per_hour: activity.price_per_hour.unwrap_or(0.0),
            money_received: activity.money_received.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCreate {
    pub activity_id: ActivityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUpdate {
    pub name: String,
}

/// Query parameters accepted by `GET /api/activities/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    pub finalized: bool,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn deserializes_running_time_entry() {
        let entry: TimeEntry = serde_json::from_str(
            r#"{"time_entry_id": 7, "task_id": 3, "start_time": "2024-03-01T09:00:12.5", "end_time": null}"#,
        )
        .unwrap();

        assert_eq!(entry.time_entry_id, Some(7));
        assert!(entry.is_running());
        assert_eq!(entry.duration_minutes(), None);
    }

    #[test]
    fn duration_truncates_to_whole_minutes() {
        let entry = TimeEntry {
            time_entry_id: Some(1),
            task_id: 1,
            start_time: datetime!(2024-03-01 09:00:00),
            end_time: Some(datetime!(2024-03-01 09:03:59)),
        };
        assert_eq!(entry.duration_minutes(), Some(3));
    }

    #[test]
    fn deserializes_task_with_display_times() {
        let task: Task = serde_json::from_str(
            r#"{"task_id": 2, "activity_id": 1, "name": "Draft", "start_time": "2024-03-01 09:00", "end_time": null, "duration": 3.0, "closed": null}"#,
        )
        .unwrap();

        assert_eq!(task.start_time, Some(datetime!(2024-03-01 09:00)));
        assert_eq!(task.duration, 3.0);
        assert!(!task.is_closed());
    }

    #[test]
    fn update_body_fills_optional_fields() {
        let activity = Activity {
            activity_id: Some(4),
            name: "Write report".to_string(),
            original_estimate: 5.0,
            remaining_hours: 5.0,
            completed_hours: 0.0,
            finalized: None,
            price_per_hour: None,
            money_received: None,
        };
        let update = ActivityUpdate::from(&activity);
        assert!(!update.finalized);
        assert_eq!(update.price_per_hour, 0.0);
        assert!(!update.money_received);
    }
}
