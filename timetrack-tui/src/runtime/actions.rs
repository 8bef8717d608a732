use crate::api::ApiClient;
use crate::app::{
    ActivityForm, ActivitySubmission, App, DeleteTarget, StatusKind, TaskForm, TaskSubmission,
    View, NEW_RECORD_ID,
};
use crate::time_utils::{format_minutes, format_timestamp};
use std::time::Instant;
use timetrack_client::{ActivityId, ApiError, Task, TaskId, TimeEntry, TimeEntryId};

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &ApiClient) {
    match action {
        Action::LoadActivities => load_activities(app, client).await,
        Action::OpenTasks { activity_id } => open_tasks(app, client, activity_id).await,
        Action::ReloadTasks => {
            if let Some(activity_id) = app.current_activity_id() {
                load_tasks(app, client, activity_id).await;
            }
        }
        Action::OpenTimeEntries { task_id } => {
            if load_time_entries(app, client, task_id).await {
                app.navigate_to(View::TimeEntries);
            }
        }
        Action::ReloadTimeEntries => {
            if let Some(task_id) = app.current_task_id() {
                if load_time_entries(app, client, task_id).await {
                    app.set_status(StatusKind::Info, "Time entries reloaded");
                }
            }
        }
        Action::ToggleTimer => toggle_timer(app, client).await,
        Action::InspectEntry { id } => inspect_entry(app, client, id).await,
        Action::OpenActivityForm { id } => open_activity_form(app, client, id).await,
        Action::SubmitActivityForm => submit_activity_form(app, client).await,
        Action::OpenTaskForm { id } => open_task_form(app, client, id).await,
        Action::SubmitTaskForm => submit_task_form(app, client).await,
        Action::CloseTask { id } => close_task(app, client, id).await,
        Action::ConfirmDelete => confirm_delete(app, client).await,
    }
}

/// Log a failed call and surface it in the status banner. Client errors
/// (4xx) are warnings; everything else is an error.
fn report_failure(app: &mut App, what: &str, err: &ApiError) {
    let kind = match err {
        ApiError::NotFound { .. } => StatusKind::Warning,
        ApiError::Rejected { status, .. } if *status < 500 => StatusKind::Warning,
        _ => StatusKind::Error,
    };
    if kind == StatusKind::Error {
        tracing::error!(error = %err, "{}", what);
    } else {
        tracing::warn!(error = %err, "{}", what);
    }

    let reason = err
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    app.set_status(kind, format!("{}: {}", what, reason));
}

async fn load_activities(app: &mut App, client: &ApiClient) {
    match client.list_activities(&app.activity_filter).await {
        Ok(activities) => {
            tracing::debug!(count = activities.len(), "Loaded activities");
            app.set_activities(activities);
        }
        Err(e) => report_failure(app, "Failed to load activities", &e),
    }
}

async fn open_tasks(app: &mut App, client: &ApiClient, activity_id: ActivityId) {
    let activity = match client.get_activity(activity_id).await {
        Ok(activity) => activity,
        Err(e) => {
            report_failure(app, "Failed to load activity", &e);
            return;
        }
    };

    app.current_activity = Some(activity);
    app.task_search_input.clear();
    app.task_search_active = false;
    app.selected_task_index = 0;
    app.tasks.clear();
    app.filter_tasks();
    app.navigate_to(View::Tasks);
    load_tasks(app, client, activity_id).await;
}

async fn load_tasks(app: &mut App, client: &ApiClient, activity_id: ActivityId) {
    match client.list_tasks(activity_id).await {
        Ok(tasks) => app.set_tasks(tasks),
        Err(e) => report_failure(app, "Failed to load tasks", &e),
    }
}

async fn fetch_time_entries(
    client: &ApiClient,
    task_id: TaskId,
) -> Result<(Task, Vec<TimeEntry>, Option<TimeEntry>), ApiError> {
    let task = client.get_task(task_id).await?;
    let entries = client.list_time_entries(task_id).await?;
    let playing = client.playing_time_entry(task_id).await?;
    Ok((task, entries, playing))
}

/// Fetch the task, its entries and the playing entry, then reconcile the
/// timer. Returns whether the load succeeded.
async fn load_time_entries(app: &mut App, client: &ApiClient, task_id: TaskId) -> bool {
    match fetch_time_entries(client, task_id).await {
        Ok((task, entries, playing)) => {
            tracing::debug!(
                task_id,
                entries = entries.len(),
                playing = ?playing.as_ref().and_then(|e| e.time_entry_id),
                "Reconciling timer"
            );
            app.current_task = Some(task);
            app.apply_time_entries(entries, playing.as_ref(), Instant::now());
            true
        }
        Err(e) => {
            report_failure(app, "Failed to load time entries", &e);
            false
        }
    }
}

/// Refetch the entry list and task totals after a start/stop. The timer has
/// already been updated from the toggle response.
async fn refresh_after_toggle(app: &mut App, client: &ApiClient, task_id: TaskId) {
    match client.list_time_entries(task_id).await {
        Ok(entries) => app.set_time_entries(entries),
        Err(e) => report_failure(app, "Failed to refresh time entries", &e),
    }
    match client.get_task(task_id).await {
        Ok(task) => app.current_task = Some(task),
        Err(e) => tracing::warn!(error = %e, task_id, "Failed to refresh task"),
    }
}

async fn toggle_timer(app: &mut App, client: &ApiClient) {
    let Some(task_id) = app.current_task_id() else {
        return;
    };

    if app.timer.is_running() {
        let Some(entry_id) = app.timer.playing_entry_id() else {
            app.set_status(StatusKind::Warning, "No playing entry to stop; reload with r");
            return;
        };
        match client.stop_time_entry(entry_id).await {
            Ok(entry) => {
                tracing::info!(task_id, entry_id, "Timer stopped");
                app.timer.stopped();
                let minutes = entry.duration_minutes().unwrap_or(0);
                app.set_status(
                    StatusKind::Success,
                    format!("Timer stopped after {}", format_minutes(minutes)),
                );
            }
            Err(e) => {
                report_failure(app, "Failed to stop timer", &e);
                return;
            }
        }
    } else {
        match client.start_time_entry(task_id).await {
            Ok(entry) => {
                tracing::info!(task_id, entry_id = ?entry.time_entry_id, "Timer started");
                app.timer.started(&entry, Instant::now());
                app.set_status(StatusKind::Success, "Timer started");
            }
            Err(e) => {
                report_failure(app, "Failed to start timer", &e);
                return;
            }
        }
    }

    refresh_after_toggle(app, client, task_id).await;
}

/// Fetch one entry fresh from the server and summarise it in the banner.
async fn inspect_entry(app: &mut App, client: &ApiClient, id: TimeEntryId) {
    match client.get_time_entry(id).await {
        Ok(entry) => {
            let summary = match entry.duration_minutes() {
                Some(minutes) => format!(
                    "Entry #{}: {} to {} ({})",
                    id,
                    format_timestamp(Some(entry.start_time)),
                    format_timestamp(entry.end_time),
                    format_minutes(minutes)
                ),
                None => format!(
                    "Entry #{}: running since {}",
                    id,
                    format_timestamp(Some(entry.start_time))
                ),
            };
            app.set_status(StatusKind::Info, summary);
        }
        Err(e) => report_failure(app, "Failed to load time entry", &e),
    }
}

async fn open_activity_form(app: &mut App, client: &ApiClient, id: ActivityId) {
    let form = if id == NEW_RECORD_ID {
        ActivityForm::default()
    } else {
        match client.get_activity(id).await {
            Ok(activity) => ActivityForm::from_activity(&activity),
            Err(e) => {
                report_failure(app, "Failed to load activity", &e);
                return;
            }
        }
    };
    app.activity_form = Some(form);
    app.navigate_to(View::ActivityForm);
}

async fn submit_activity_form(app: &mut App, client: &ApiClient) {
    let Some(form) = &app.activity_form else {
        return;
    };
    let submission = match form.submission() {
        Ok(submission) => submission,
        Err(e) => {
            app.set_status(StatusKind::Warning, e.to_string());
            return;
        }
    };

    let (result, verb) = match &submission {
        ActivitySubmission::Create(body) => (client.create_activity(body).await, "Created"),
        ActivitySubmission::Update(id, body) => {
            (client.update_activity(*id, body).await, "Updated")
        }
    };

    match result {
        Ok(activity) => {
            tracing::info!(activity_id = ?activity.activity_id, "{} activity", verb);
            app.activity_form = None;
            app.navigate_to(View::Activities);
            load_activities(app, client).await;
            app.set_status(
                StatusKind::Success,
                format!("{} activity {}", verb, activity.name),
            );
        }
        Err(e) => report_failure(app, "Failed to save activity", &e),
    }
}

async fn open_task_form(app: &mut App, client: &ApiClient, id: TaskId) {
    let form = if id == NEW_RECORD_ID {
        let Some(activity_id) = app.current_activity_id() else {
            return;
        };
        TaskForm::new(activity_id)
    } else {
        match client.get_task(id).await {
            Ok(task) => TaskForm::from_task(&task),
            Err(e) => {
                report_failure(app, "Failed to load task", &e);
                return;
            }
        }
    };
    app.task_form = Some(form);
    app.navigate_to(View::TaskForm);
}

async fn submit_task_form(app: &mut App, client: &ApiClient) {
    let Some(form) = &app.task_form else {
        return;
    };
    let activity_id = form.activity_id;
    let submission = match form.submission() {
        Ok(submission) => submission,
        Err(e) => {
            app.set_status(StatusKind::Warning, e.to_string());
            return;
        }
    };

    let (result, verb) = match &submission {
        TaskSubmission::Create(body) => (client.create_task(body).await, "Created"),
        TaskSubmission::Update(id, body) => (client.update_task(*id, body).await, "Updated"),
    };

    match result {
        Ok(task) => {
            tracing::info!(task_id = ?task.task_id, activity_id, "{} task", verb);
            app.task_form = None;
            app.navigate_to(View::Tasks);
            load_tasks(app, client, activity_id).await;
            app.set_status(StatusKind::Success, format!("{} task {}", verb, task.name));
        }
        Err(e) => report_failure(app, "Failed to save task", &e),
    }
}

async fn close_task(app: &mut App, client: &ApiClient, id: TaskId) {
    match client.close_task(id).await {
        Ok(task) => {
            tracing::info!(task_id = id, "Closed task");
            if let Some(activity_id) = app.current_activity_id() {
                load_tasks(app, client, activity_id).await;
            }
            app.set_status(StatusKind::Success, format!("Closed task {}", task.name));
        }
        Err(e) => report_failure(app, "Failed to close task", &e),
    }
}

async fn confirm_delete(app: &mut App, client: &ApiClient) {
    let Some(ctx) = app.delete_context.take() else {
        return;
    };
    app.navigate_to(ctx.origin);

    match ctx.target {
        DeleteTarget::Activity { id, name } => match client.delete_activity(id).await {
            Ok(()) => {
                tracing::info!(activity_id = id, "Deleted activity");
                app.remove_activity(id);
                app.set_status(StatusKind::Success, format!("Deleted activity {}", name));
            }
            Err(e) => report_failure(app, "Failed to delete activity", &e),
        },
        DeleteTarget::Task { id, name } => match client.delete_task(id).await {
            Ok(()) => {
                tracing::info!(task_id = id, "Deleted task");
                app.remove_task(id);
                app.set_status(StatusKind::Success, format!("Deleted task {}", name));
            }
            Err(e) => report_failure(app, "Failed to delete task", &e),
        },
    }
}
