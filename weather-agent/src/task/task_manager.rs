//! Task lifecycle management for the A2A protocol surface.
//!
//! [`WeatherTaskManager`] sits between the JSON-RPC transport and the
//! [`WeatherAgent`]: it validates requests, maintains the task records in a
//! [`TaskStore`], and drives the agent to produce either a single completed
//! task snapshot (`tasks/send`) or a sequence of status-update events
//! (`tasks/sendSubscribe`).
//!
//! State machine per task id:
//! `(none) -> submitted -> working -> completed | failed`.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use chrono::Utc;
use futures::{Stream, StreamExt};

use a2a_protocol::{
    Artifact, CancelTaskResponse, ContentTypeNotSupportedError, GetTaskResponse, InternalError,
    InvalidParamsError, JsonRpcError, JsonRpcId, Message, Part, SendTaskResponse,
    SendTaskStreamingResponse, Task, TaskIdParams, TaskNotCancelableError, TaskNotFoundError,
    TaskQueryParams, TaskSendParams, TaskState, TaskStatus, TaskStatusUpdateEvent,
};

use crate::agent::WeatherAgent;
use crate::errors::{AgentError, AgentResult};
use crate::task::{InMemoryTaskStore, TaskStore};

/// Checks whether the client's accepted output modes intersect what the
/// server can produce. An empty accepted list means the client takes anything.
pub fn are_modalities_compatible(accepted: &[String], supported: &[&str]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    accepted
        .iter()
        .any(|mode| supported.iter().any(|supported| supported == mode))
}

/// The outcome of a `tasks/sendSubscribe` request: an event stream, or an
/// immediate protocol error response when the request never got that far.
pub enum TaskSubscription {
    Events(Pin<Box<dyn Stream<Item = SendTaskStreamingResponse> + Send>>),
    Rejected(Box<SendTaskStreamingResponse>),
}

/// Task manager wiring the weather agent into the A2A task protocol.
pub struct WeatherTaskManager {
    agent: Arc<WeatherAgent>,
    store: Arc<dyn TaskStore>,
}

impl WeatherTaskManager {
    /// Creates a task manager around the agent with an in-memory store.
    pub fn new(agent: WeatherAgent) -> Self {
        Self {
            agent: Arc::new(agent),
            store: Arc::new(InMemoryTaskStore::new()),
        }
    }

    /// Replaces the task store backend.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn TaskStore>) -> Self {
        self.store = store;
        self
    }

    /// Handles a non-streaming `tasks/send` request.
    ///
    /// Validation happens before any task record is created. Invocation
    /// failures transition the stored task to `Failed` and surface as an
    /// internal-error response carrying the error text.
    pub async fn on_send_task(
        &self,
        request_id: Option<JsonRpcId>,
        params: TaskSendParams,
    ) -> SendTaskResponse {
        if let Some(error) = self.validate_request(&params) {
            return SendTaskResponse::error(request_id, error);
        }
        let query = match Self::user_query(&params) {
            Ok(query) => query,
            Err(error) => {
                return SendTaskResponse::error(request_id, invalid_params(&error));
            }
        };
        if let Err(error) = self.store.upsert_task(&params).await {
            return SendTaskResponse::error(request_id, InternalError::with_message(error.to_string()));
        }

        match self.invoke_agent(&params, &query).await {
            Ok(task) => SendTaskResponse::success(request_id, task),
            Err(error) => {
                tracing::error!(task_id = %params.id, error = %error, "error invoking agent");
                self.record_failure(&params.id, &error).await;
                SendTaskResponse::error(
                    request_id,
                    InternalError::with_message(format!("Error invoking agent: {error}")),
                )
            }
        }
    }

    /// Handles a streaming `tasks/sendSubscribe` request.
    ///
    /// Returns a lazy event sequence: one `working` status update per agent
    /// update, then a single `completed` update flagged final. When the agent
    /// errors mid-stream the task is recorded as `Failed`, exactly one
    /// internal-error response is emitted, and the sequence ends.
    pub async fn on_send_task_subscribe(
        &self,
        request_id: Option<JsonRpcId>,
        params: TaskSendParams,
    ) -> TaskSubscription {
        if let Some(error) = self.validate_request(&params) {
            return TaskSubscription::Rejected(Box::new(SendTaskStreamingResponse::error(
                request_id, error,
            )));
        }
        let query = match Self::user_query(&params) {
            Ok(query) => query,
            Err(error) => {
                return TaskSubscription::Rejected(Box::new(SendTaskStreamingResponse::error(
                    request_id,
                    invalid_params(&error),
                )));
            }
        };
        if let Err(error) = self.store.upsert_task(&params).await {
            return TaskSubscription::Rejected(Box::new(SendTaskStreamingResponse::error(
                request_id,
                InternalError::with_message(error.to_string()),
            )));
        }

        let agent = Arc::clone(&self.agent);
        let store = Arc::clone(&self.store);
        let task_id = params.id.clone();
        let session_id = params.session_id.clone();

        let events = stream! {
            let updates = agent.stream(query, session_id);
            futures::pin_mut!(updates);

            while let Some(item) = updates.next().await {
                match item {
                    Ok(update) => {
                        let is_final = update.is_task_complete;
                        let parts = vec![Part::text(update.content)];
                        let state = if is_final {
                            TaskState::Completed
                        } else {
                            TaskState::Working
                        };
                        let status = TaskStatus {
                            state,
                            message: Some(Message::agent(parts.clone())),
                            timestamp: Some(Utc::now().to_rfc3339()),
                        };
                        // The final update also persists the produced artifact,
                        // keeping the record consistent with the tasks/send path.
                        let artifacts = is_final.then(|| vec![Artifact::from_parts(parts)]);

                        if let Err(error) =
                            store.update_task(&task_id, status.clone(), artifacts).await
                        {
                            tracing::error!(task_id = %task_id, error = %error, "failed to persist task update");
                            yield SendTaskStreamingResponse::error(
                                request_id.clone(),
                                InternalError::with_message(error.to_string()),
                            );
                            break;
                        }

                        yield SendTaskStreamingResponse::event(
                            request_id.clone(),
                            TaskStatusUpdateEvent {
                                id: task_id.clone(),
                                status,
                                is_final,
                                metadata: None,
                            },
                        );
                        if is_final {
                            break;
                        }
                    }
                    Err(error) => {
                        tracing::error!(task_id = %task_id, error = %error, "an error occurred while streaming the response");
                        let failed = TaskStatus {
                            state: TaskState::Failed,
                            message: Some(Message::agent(vec![Part::text(error.to_string())])),
                            timestamp: Some(Utc::now().to_rfc3339()),
                        };
                        if let Err(store_error) = store.update_task(&task_id, failed, None).await {
                            tracing::warn!(task_id = %task_id, error = %store_error, "failed to record failed state");
                        }
                        yield SendTaskStreamingResponse::error(
                            request_id.clone(),
                            InternalError::with_message(
                                "An error occurred while streaming the response",
                            ),
                        );
                        break;
                    }
                }
            }
        };

        TaskSubscription::Events(Box::pin(events))
    }

    /// Handles a `tasks/get` request, trimming history to the requested length.
    pub async fn on_get_task(
        &self,
        request_id: Option<JsonRpcId>,
        params: TaskQueryParams,
    ) -> GetTaskResponse {
        match self.store.get_task(&params.id).await {
            Ok(Some(mut task)) => {
                if let Some(limit) = params.history_length {
                    if task.history.len() > limit {
                        task.history = task.history.split_off(task.history.len() - limit);
                    }
                }
                GetTaskResponse::success(request_id, task)
            }
            Ok(None) => GetTaskResponse::error(request_id, TaskNotFoundError::default()),
            Err(error) => {
                GetTaskResponse::error(request_id, InternalError::with_message(error.to_string()))
            }
        }
    }

    /// Handles a `tasks/cancel` request. Running tasks are not cancelable in
    /// this agent, so known ids always produce `TaskNotCancelableError`.
    pub async fn on_cancel_task(
        &self,
        request_id: Option<JsonRpcId>,
        params: TaskIdParams,
    ) -> CancelTaskResponse {
        match self.store.get_task(&params.id).await {
            Ok(Some(_)) => {
                CancelTaskResponse::error(request_id, TaskNotCancelableError::default())
            }
            Ok(None) => CancelTaskResponse::error(request_id, TaskNotFoundError::default()),
            Err(error) => {
                CancelTaskResponse::error(request_id, InternalError::with_message(error.to_string()))
            }
        }
    }

    /// Drives the agent for a non-streaming request: `working`, invoke, then
    /// `completed` with the response text as both status message and artifact.
    async fn invoke_agent(&self, params: &TaskSendParams, query: &str) -> AgentResult<Task> {
        self.update_store(
            &params.id,
            TaskStatus {
                state: TaskState::Working,
                message: None,
                timestamp: Some(Utc::now().to_rfc3339()),
            },
            None,
        )
        .await?;

        let response = self.agent.invoke(query, &params.session_id).await?;

        let parts = vec![Part::text(response)];
        let status = TaskStatus {
            state: TaskState::Completed,
            message: Some(Message::agent(parts.clone())),
            timestamp: Some(Utc::now().to_rfc3339()),
        };
        self.update_store(&params.id, status, Some(vec![Artifact::from_parts(parts)]))
            .await
    }

    /// Updates the stored task record. Unknown ids are request-fatal.
    async fn update_store(
        &self,
        task_id: &str,
        status: TaskStatus,
        artifacts: Option<Vec<Artifact>>,
    ) -> AgentResult<Task> {
        self.store
            .update_task(task_id, status, artifacts)
            .await
            .map_err(|error| {
                tracing::error!(task_id, %error, "task not found for updating the task");
                error
            })
    }

    /// Records a terminal `Failed` state for a task whose invocation errored.
    async fn record_failure(&self, task_id: &str, error: &AgentError) {
        let failed = TaskStatus {
            state: TaskState::Failed,
            message: Some(Message::agent(vec![Part::text(error.to_string())])),
            timestamp: Some(Utc::now().to_rfc3339()),
        };
        if let Err(store_error) = self.store.update_task(task_id, failed, None).await {
            tracing::warn!(task_id, error = %store_error, "failed to record failed state");
        }
    }

    /// Validates that the request is compatible with the agent's output modes.
    fn validate_request(&self, params: &TaskSendParams) -> Option<JsonRpcError> {
        if !are_modalities_compatible(
            &params.accepted_output_modes,
            WeatherAgent::SUPPORTED_CONTENT_TYPES,
        ) {
            tracing::warn!(
                accepted = ?params.accepted_output_modes,
                supported = ?WeatherAgent::SUPPORTED_CONTENT_TYPES,
                "unsupported output mode requested"
            );
            return Some(ContentTypeNotSupportedError::default().into());
        }
        None
    }

    /// Extracts the text query from the task parameters.
    ///
    /// Fails before any agent invocation when the first content part is not
    /// text.
    fn user_query(params: &TaskSendParams) -> AgentResult<String> {
        match params.message.parts.first() {
            Some(Part::Text { text, .. }) => Ok(text.clone()),
            Some(_) => Err(AgentError::Validation {
                field: "message.parts".to_string(),
                reason: "Only text parts are supported".to_string(),
            }),
            None => Err(AgentError::Validation {
                field: "message.parts".to_string(),
                reason: "Message has no content parts".to_string(),
            }),
        }
    }
}

fn invalid_params(error: &AgentError) -> InvalidParamsError {
    InvalidParamsError {
        data: Some(serde_json::Value::String(error.to_string())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeLlm;
    use a2a_protocol::TaskStreamingResult;
    use serde_json::json;

    fn send_params(id: &str, session_id: &str, text: &str) -> TaskSendParams {
        TaskSendParams {
            id: id.to_string(),
            session_id: session_id.to_string(),
            message: Message::user_text(text),
            accepted_output_modes: vec!["text".to_string()],
            history_length: None,
            metadata: None,
        }
    }

    fn manager_with(
        responses: Vec<AgentResult<crate::models::LlmResponse>>,
    ) -> (WeatherTaskManager, Arc<InMemoryTaskStore>) {
        let store = Arc::new(InMemoryTaskStore::new());
        let agent = WeatherAgent::new(FakeLlm::with_responses("fake-model", responses));
        let manager = WeatherTaskManager::new(agent).with_store(store.clone());
        (manager, store)
    }

    async fn collect_events(subscription: TaskSubscription) -> Vec<SendTaskStreamingResponse> {
        match subscription {
            TaskSubscription::Events(stream) => stream.collect().await,
            TaskSubscription::Rejected(response) => panic!("rejected: {:?}", response.error),
        }
    }

    #[test]
    fn modality_compatibility_matches_python_semantics() {
        let supported = WeatherAgent::SUPPORTED_CONTENT_TYPES;
        assert!(are_modalities_compatible(&[], supported));
        assert!(are_modalities_compatible(
            &["text".to_string()],
            supported
        ));
        assert!(are_modalities_compatible(
            &["image/png".to_string(), "text/plain".to_string()],
            supported
        ));
        assert!(!are_modalities_compatible(
            &["image/png".to_string()],
            supported
        ));
    }

    #[tokio::test]
    async fn send_task_completes_with_artifact_from_real_tool_flow() {
        let (manager, store) = manager_with(vec![
            FakeLlm::tool_call_response("call-1", "get_weather", json!({"location": "Tokyo"})),
            FakeLlm::text_response(
                "The weather in Tokyo is Rainy with a temperature of 28°C and humidity of 75%. TERMINATE",
            ),
        ]);

        let response = manager
            .on_send_task(
                Some(JsonRpcId::String("req-1".to_string())),
                send_params("t1", "s1", "What's the weather in Tokyo?"),
            )
            .await;

        assert!(response.error.is_none());
        let task = response.result.expect("task result");
        assert_eq!(task.id, "t1");
        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.artifacts.len(), 1);

        let artifact_text = task.artifacts[0].parts[0].as_text().unwrap();
        for needle in ["Tokyo", "Rainy", "28", "75"] {
            assert!(
                artifact_text.contains(needle),
                "artifact missing {needle}: {artifact_text}"
            );
        }

        // The store holds the same record.
        let stored = store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(stored.status.state, TaskState::Completed);
        assert_eq!(stored.artifacts.len(), 1);
    }

    #[tokio::test]
    async fn send_task_twice_with_same_id_never_reports_task_not_found() {
        let (manager, _store) = manager_with(vec![
            FakeLlm::text_response("First answer. TERMINATE"),
            FakeLlm::text_response("Second answer. TERMINATE"),
        ]);

        let first = manager
            .on_send_task(None, send_params("t1", "s1", "Weather in Paris?"))
            .await;
        assert!(first.error.is_none());

        let second = manager
            .on_send_task(None, send_params("t1", "s1", "Weather in Berlin?"))
            .await;
        assert!(second.error.is_none(), "second send failed: {:?}", second.error);

        // Upsert merged the second message into the history.
        let task = second.result.unwrap();
        assert_eq!(task.history.len(), 2);
    }

    #[tokio::test]
    async fn send_task_failure_transitions_stored_task_to_failed() {
        let (manager, store) = manager_with(vec![Err(AgentError::LlmProvider {
            provider: "OpenAI".to_string(),
            message: "boom".to_string(),
        })]);

        let response = manager
            .on_send_task(None, send_params("t1", "s1", "Weather?"))
            .await;

        let error = response.error.expect("error response");
        assert_eq!(error.code, -32603);
        assert!(error.message.contains("Error invoking agent"));

        let stored = store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(stored.status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn incompatible_output_modes_are_rejected_before_task_creation() {
        let (manager, store) = manager_with(vec![]);
        let mut params = send_params("t1", "s1", "Weather?");
        params.accepted_output_modes = vec!["image/png".to_string()];

        let response = manager.on_send_task(None, params).await;
        assert_eq!(response.error.as_ref().unwrap().code, -32005);
        assert!(store.get_task("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_text_first_part_is_rejected_before_task_creation() {
        let (manager, store) = manager_with(vec![]);
        let mut params = send_params("t1", "s1", "ignored");
        params.message.parts = vec![Part::Data {
            data: json!({"question": "weather?"}),
            metadata: None,
        }];

        let response = manager.on_send_task(None, params).await;
        assert_eq!(response.error.as_ref().unwrap().code, -32602);
        assert!(store.get_task("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn subscribe_streams_working_updates_then_final_completed() {
        let (manager, store) = manager_with(vec![
            FakeLlm::tool_call_response("call-1", "get_weather", json!({"location": "Tokyo"})),
            FakeLlm::text_response("Tokyo is Rainy, 28°C, humidity 75%. TERMINATE"),
        ]);

        let subscription = manager
            .on_send_task_subscribe(
                Some(JsonRpcId::Integer(9)),
                send_params("t1", "s1", "What's the weather in Tokyo?"),
            )
            .await;
        let events = collect_events(subscription).await;

        // Processing notice + assistant text, then the final event.
        assert!(events.len() <= 6, "too many events: {}", events.len());
        let (final_event, non_final) = events.split_last().unwrap();

        for event in non_final {
            match event.result.as_ref().expect("status event") {
                TaskStreamingResult::StatusUpdate(update) => {
                    assert!(!update.is_final);
                    assert_eq!(update.status.state, TaskState::Working);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }

        match final_event.result.as_ref().expect("final event") {
            TaskStreamingResult::StatusUpdate(update) => {
                assert!(update.is_final);
                assert_eq!(update.status.state, TaskState::Completed);
            }
            other => panic!("unexpected final event: {other:?}"),
        }

        // The streaming path persists the artifact too.
        let stored = store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(stored.status.state, TaskState::Completed);
        assert_eq!(stored.artifacts.len(), 1);
    }

    #[tokio::test]
    async fn subscribe_agent_error_yields_single_internal_error_and_stops() {
        // No queued responses: the agent errors on its first model call.
        let (manager, store) = manager_with(vec![]);

        let subscription = manager
            .on_send_task_subscribe(None, send_params("t1", "s1", "Weather?"))
            .await;
        let events = collect_events(subscription).await;

        // The processing notice arrives first, then exactly one error ends it.
        let errors: Vec<_> = events.iter().filter(|e| e.error.is_some()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error.as_ref().unwrap().code, -32603);
        assert!(events.last().unwrap().error.is_some(), "error must be last");

        let stored = store.get_task("t1").await.unwrap().unwrap();
        assert_eq!(stored.status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn subscribe_rejects_incompatible_modes() {
        let (manager, _store) = manager_with(vec![]);
        let mut params = send_params("t1", "s1", "Weather?");
        params.accepted_output_modes = vec!["video/mp4".to_string()];

        match manager.on_send_task_subscribe(None, params).await {
            TaskSubscription::Rejected(response) => {
                assert_eq!(response.error.unwrap().code, -32005);
            }
            TaskSubscription::Events(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn get_task_trims_history_and_reports_unknown_ids() {
        let (manager, _store) = manager_with(vec![
            FakeLlm::text_response("One. TERMINATE"),
            FakeLlm::text_response("Two. TERMINATE"),
        ]);

        manager
            .on_send_task(None, send_params("t1", "s1", "first"))
            .await;
        manager
            .on_send_task(None, send_params("t1", "s1", "second"))
            .await;

        let response = manager
            .on_get_task(
                None,
                TaskQueryParams {
                    id: "t1".to_string(),
                    history_length: Some(1),
                    metadata: None,
                },
            )
            .await;
        let task = response.result.unwrap();
        assert_eq!(task.history.len(), 1);
        assert_eq!(
            task.history[0].parts[0].as_text(),
            Some("second")
        );

        let response = manager
            .on_get_task(
                None,
                TaskQueryParams {
                    id: "missing".to_string(),
                    history_length: None,
                    metadata: None,
                },
            )
            .await;
        assert_eq!(response.error.unwrap().code, -32001);
    }

    #[tokio::test]
    async fn cancel_task_is_not_supported() {
        let (manager, _store) = manager_with(vec![FakeLlm::text_response("Done. TERMINATE")]);
        manager
            .on_send_task(None, send_params("t1", "s1", "Weather?"))
            .await;

        let response = manager
            .on_cancel_task(
                None,
                TaskIdParams {
                    id: "t1".to_string(),
                    metadata: None,
                },
            )
            .await;
        assert_eq!(response.error.unwrap().code, -32002);

        let response = manager
            .on_cancel_task(
                None,
                TaskIdParams {
                    id: "missing".to_string(),
                    metadata: None,
                },
            )
            .await;
        assert_eq!(response.error.unwrap().code, -32001);
    }
}
