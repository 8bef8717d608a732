use std::sync::Arc;

use timetrack_client::{
    Activity, ActivityCreate, ActivityFilter, ActivityId, ActivityUpdate, ApiError, Task,
    TaskCreate, TaskId, TaskUpdate, TimeEntry, TimeEntryId, TrackerClient,
};

use crate::api::dev_backend::DevBackend;
use crate::clock::Clock;

/// Every call the UI makes goes through here. In dev mode the calls are
/// answered by an in-memory [`DevBackend`] instead of the server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: TrackerClient,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: TrackerClient::new(base_url)?,
            dev_backend: None,
        })
    }

    pub fn dev(clock: Arc<dyn Clock>) -> Result<Self, ApiError> {
        Ok(Self {
            client: TrackerClient::new("http://localhost")?,
            dev_backend: Some(DevBackend::new(clock)),
        })
    }

    #[cfg(test)]
    pub fn with_backend(backend: DevBackend) -> Self {
        Self {
            client: TrackerClient::new("http://localhost").expect("static URL parses"),
            dev_backend: Some(backend),
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    pub async fn list_activities(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_activities(filter));
        }
        self.client.list_activities(filter).await
    }

    pub async fn get_activity(&self, id: ActivityId) -> Result<Activity, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.get_activity(id);
        }
        self.client.get_activity(id).await
    }

    pub async fn create_activity(&self, body: &ActivityCreate) -> Result<Activity, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_activity(body));
        }
        self.client.create_activity(body).await
    }

    pub async fn update_activity(
        &self,
        id: ActivityId,
        body: &ActivityUpdate,
    ) -> Result<Activity, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_activity(id, body);
        }
        self.client.update_activity(id, body).await
    }

    pub async fn delete_activity(&self, id: ActivityId) -> Result<(), ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_activity(id);
        }
        self.client.delete_activity(id).await
    }

    pub async fn list_tasks(&self, activity_id: ActivityId) -> Result<Vec<Task>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_tasks(activity_id));
        }
        self.client.list_tasks(activity_id).await
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.get_task(id);
        }
        self.client.get_task(id).await
    }

    pub async fn create_task(&self, body: &TaskCreate) -> Result<Task, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_task(body);
        }
        self.client.create_task(body).await
    }

    pub async fn update_task(&self, id: TaskId, body: &TaskUpdate) -> Result<Task, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_task(id, body);
        }
        self.client.update_task(id, body).await
    }

    pub async fn close_task(&self, id: TaskId) -> Result<Task, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.close_task(id);
        }
        self.client.close_task(id).await
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_task(id);
        }
        self.client.delete_task(id).await
    }

    pub async fn list_time_entries(&self, task_id: TaskId) -> Result<Vec<TimeEntry>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.list_time_entries(task_id));
        }
        self.client.list_time_entries(task_id).await
    }

    pub async fn playing_time_entry(&self, task_id: TaskId) -> Result<Option<TimeEntry>, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.playing_time_entry(task_id));
        }
        self.client.playing_time_entry(task_id).await
    }

    pub async fn get_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.get_time_entry(id);
        }
        self.client.get_time_entry(id).await
    }

    pub async fn start_time_entry(&self, task_id: TaskId) -> Result<TimeEntry, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.start_time_entry(task_id);
        }
        self.client.start_time_entry(task_id).await
    }

    pub async fn stop_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        if let Some(dev) = &self.dev_backend {
            return dev.stop_time_entry(id);
        }
        self.client.stop_time_entry(id).await
    }
}
