use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{parse_detail, ApiError};
use crate::models::{
    Activity, ActivityCreate, ActivityFilter, ActivityId, ActivityUpdate, Task, TaskCreate, TaskId,
    TaskUpdate, TimeEntry, TimeEntryId,
};

/// Async client for the time-tracking REST API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Client,
    base_url: Url,
}

impl TrackerClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ApiError> {
        // Trailing slash so relative joins keep any path prefix on the base URL.
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        tracing::debug!(call = call_name, "sending request");

        let response = request.send().await.map_err(|source| {
            tracing::warn!(call = call_name, error = %source, "request failed");
            ApiError::Request {
                call: call_name.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| parse_detail(&body));
        tracing::warn!(
            call = call_name,
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "API returned error status"
        );

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                call: call_name.to_string(),
                detail,
            });
        }

        Err(ApiError::Rejected {
            call: call_name.to_string(),
            status: status.as_u16(),
            detail,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode {
                call: call_name.to_string(),
                source,
            })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        response.bytes().await.map_err(|source| {
            tracing::warn!(call = call_name, error = %source, "reading response body failed");
            ApiError::Request {
                call: call_name.to_string(),
                source,
            }
        })?;
        Ok(())
    }

    // Activities

    pub async fn list_activities(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, ApiError> {
        let mut request = self
            .client
            .get(self.endpoint("/api/activities/")?)
            .query(&[("finalized", filter.finalized.to_string())]);
        if !filter.name.is_empty() {
            request = request.query(&[("name", filter.name.as_str())]);
        }

        self.get_json(request, "GET /api/activities/").await
    }

    pub async fn get_activity(&self, id: ActivityId) -> Result<Activity, ApiError> {
        self.get_json(
            self.client
                .get(self.endpoint(&format!("/api/activities/{}/", id))?),
            "GET /api/activities/:id/",
        )
        .await
    }

    pub async fn create_activity(&self, body: &ActivityCreate) -> Result<Activity, ApiError> {
        self.get_json(
            self.client
                .post(self.endpoint("/api/activities/")?)
                .json(body),
            "POST /api/activities/",
        )
        .await
    }

    pub async fn update_activity(
        &self,
        id: ActivityId,
        body: &ActivityUpdate,
    ) -> Result<Activity, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("/api/activities/{}/", id))?)
                .json(body),
            "PUT /api/activities/:id/",
        )
        .await
    }

    pub async fn delete_activity(&self, id: ActivityId) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("/api/activities/{}/", id))?),
            "DELETE /api/activities/:id/",
        )
        .await
    }

    // Tasks

    pub async fn list_tasks(&self, activity_id: ActivityId) -> Result<Vec<Task>, ApiError> {
        self.get_json(
            self.client
                .get(self.endpoint(&format!("/api/tasks/activity/{}/", activity_id))?),
            "GET /api/tasks/activity/:id/",
        )
        .await
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.get_json(
            self.client
                .get(self.endpoint(&format!("/api/tasks/{}/", id))?),
            "GET /api/tasks/:id/",
        )
        .await
    }

    pub async fn create_task(&self, body: &TaskCreate) -> Result<Task, ApiError> {
        self.get_json(
            self.client.post(self.endpoint("/api/tasks/")?).json(body),
            "POST /api/tasks/",
        )
        .await
    }

    pub async fn update_task(&self, id: TaskId, body: &TaskUpdate) -> Result<Task, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("/api/tasks/{}/", id))?)
                .json(body),
            "PUT /api/tasks/:id/",
        )
        .await
    }

    pub async fn close_task(&self, id: TaskId) -> Result<Task, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("/api/tasks/close/{}/", id))?),
            "PUT /api/tasks/close/:id/",
        )
        .await
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("/api/tasks/{}/", id))?),
            "DELETE /api/tasks/:id/",
        )
        .await
    }

    // Time entries

    pub async fn list_time_entries(&self, task_id: TaskId) -> Result<Vec<TimeEntry>, ApiError> {
        self.get_json(
            self.client
                .get(self.endpoint(&format!("/api/time_entries/task/{}/", task_id))?),
            "GET /api/time_entries/task/:id/",
        )
        .await
    }

    /// The entry of `task_id` that has no end time. The API answers 404 when
    /// nothing is playing, which is reported as `Ok(None)`.
    pub async fn playing_time_entry(&self, task_id: TaskId) -> Result<Option<TimeEntry>, ApiError> {
        let result = self
            .get_json(
                self.client.get(
                    self.endpoint(&format!("/api/time_entries/task/{}/playing", task_id))?,
                ),
                "GET /api/time_entries/task/:id/playing",
            )
            .await;

        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn get_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        self.get_json(
            self.client
                .get(self.endpoint(&format!("/api/time_entries/{}/", id))?),
            "GET /api/time_entries/:id/",
        )
        .await
    }

    pub async fn start_time_entry(&self, task_id: TaskId) -> Result<TimeEntry, ApiError> {
        self.get_json(
            self.client
                .post(self.endpoint(&format!("/api/time_entries/{}/start", task_id))?),
            "POST /api/time_entries/:id/start",
        )
        .await
    }

    pub async fn stop_time_entry(&self, id: TimeEntryId) -> Result<TimeEntry, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("/api/time_entries/{}/stop", id))?),
            "PUT /api/time_entries/:id/stop",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn activity_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "activity_id": id,
            "name": name,
            "original_estimate": 5.0,
            "remaining_hours": 5.0,
            "completed_hours": 0.0,
            "finalized": false,
            "price_per_hour": null,
            "money_received": null
        })
    }

    fn entry_json(id: i64, task_id: i64, end_time: Option<&str>) -> serde_json::Value {
        json!({
            "time_entry_id": id,
            "task_id": task_id,
            "start_time": "2024-03-01T09:00:00",
            "end_time": end_time
        })
    }

    async fn client_for(server: &MockServer) -> TrackerClient {
        TrackerClient::new(&server.uri()).unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = TrackerClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn keeps_base_path_prefix() {
        let client = TrackerClient::new("http://localhost:5001/tracker/").unwrap();
        let url = client.endpoint("/api/activities/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/tracker/api/activities/");
    }

    #[tokio::test]
    async fn list_activities_sends_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/activities/"))
            .and(query_param("finalized", "true"))
            .and(query_param("name", "report"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([activity_json(1, "Write report")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let activities = client_for(&server)
            .await
            .list_activities(&ActivityFilter {
                finalized: true,
                name: "report".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name, "Write report");
    }

    #[tokio::test]
    async fn create_activity_posts_to_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/activities/"))
            .and(body_json(json!({"name": "Write report", "original_estimate": 5.0})))
            .respond_with(ResponseTemplate::new(201).set_body_json(activity_json(9, "Write report")))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .await
            .create_activity(&ActivityCreate {
                name: "Write report".to_string(),
                original_estimate: 5.0,
            })
            .await
            .unwrap();

        assert_eq!(created.activity_id, Some(9));
    }

    #[tokio::test]
    async fn update_activity_puts_to_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/activities/9/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(activity_json(9, "Renamed")))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server)
            .await
            .update_activity(
                9,
                &ActivityUpdate {
                    name: "Renamed".to_string(),
                    original_estimate: 5.0,
                    completed_hours: 0.0,
                    finalized: false,
                    price_per_hour: 0.0,
                    money_received: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn delete_activity_accepts_null_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/activities/3/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.delete_activity(3).await.unwrap();
    }

    #[tokio::test]
    async fn task_endpoints_use_expected_paths() {
        let server = MockServer::start().await;
        let task = json!({
            "task_id": 5,
            "activity_id": 1,
            "name": "Draft",
            "start_time": null,
            "end_time": null,
            "duration": 0.0,
            "closed": false
        });
        Mock::given(method("GET"))
            .and(path("/api/tasks/activity/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([task.clone()])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tasks/"))
            .and(body_json(json!({"activity_id": 1, "name": "Draft"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(task.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/tasks/close/5/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(task.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.list_tasks(1).await.unwrap().len(), 1);
        let created = client
            .create_task(&TaskCreate {
                activity_id: 1,
                name: "Draft".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.task_id, Some(5));
        client.close_task(5).await.unwrap();
    }

    #[tokio::test]
    async fn playing_entry_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/time_entries/task/4/playing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"detail": "No time entry without end time"})),
            )
            .mount(&server)
            .await;

        let playing = client_for(&server).await.playing_time_entry(4).await.unwrap();
        assert!(playing.is_none());
    }

    #[tokio::test]
    async fn playing_entry_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/time_entries/task/4/playing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_json(11, 4, None)))
            .mount(&server)
            .await;

        let playing = client_for(&server).await.playing_time_entry(4).await.unwrap();
        assert_eq!(playing.and_then(|e| e.time_entry_id), Some(11));
    }

    #[tokio::test]
    async fn start_and_stop_hit_timer_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/time_entries/4/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_json(11, 4, None)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/time_entries/11/stop"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(entry_json(11, 4, Some("2024-03-01T09:03:00"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let started = client.start_time_entry(4).await.unwrap();
        assert!(started.is_running());
        let stopped = client.stop_time_entry(11).await.unwrap();
        assert_eq!(stopped.duration_minutes(), Some(3));
    }

    #[tokio::test]
    async fn rejected_request_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/time_entries/4/start"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Task closed"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .start_time_entry(4)
            .await
            .unwrap_err();

        match err {
            ApiError::Rejected { status, detail, .. } => {
                assert_eq!(status, 400);
                assert_eq!(detail.as_deref(), Some("Task closed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_task_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/99/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Task not found"})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_task(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.detail(), Some("Task not found"));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/time_entries/task/4/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_time_entries(4)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn truncated_delete_body_is_request_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 64\r\n\r\nnu")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = TrackerClient::new(&format!("http://{}", addr)).unwrap();
        let err = client.delete_task(7).await.unwrap_err();
        assert!(matches!(err, ApiError::Request { .. }));
    }
}
