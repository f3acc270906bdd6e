//! # A2A (Agent2Agent) Task Protocol Types
//!
//! This crate provides the Rust data structures for the Agent2Agent (A2A)
//! task protocol: JSON-RPC 2.0 envelopes, the task/message/artifact data
//! model, streaming status-update events, and the protocol error objects
//! with their well-known codes. The types are designed for serialization
//! and deserialization with `serde` and follow the wire format of the
//! `tasks/send` / `tasks/sendSubscribe` protocol revision:
//!
//! - Clients submit work as `Task`s identified by a client-supplied id.
//! - A task groups related exchanges through a `sessionId`.
//! - Agents report progress through `TaskStatusUpdateEvent`s and attach
//!   outputs as `Artifact`s.
//! - Agents advertise themselves through the `AgentCard` discovery document.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod agent_card;
pub use agent_card::{AgentCapabilities, AgentCard, AgentProvider, AgentSkill};

/// Map of extension-specific metadata carried by most protocol objects.
pub type Metadata = HashMap<String, serde_json::Value>;

// ============================================================================
// JSON-RPC 2.0 Base Types
// ============================================================================

/// Represents a JSON-RPC 2.0 identifier, which can be a string, number, or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Integer(i64),
    Null,
}

/// Represents a JSON-RPC 2.0 Error object, included in an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// A number that indicates the error type that occurred.
    pub code: i32,
    /// A string providing a short description of the error.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A generic JSON-RPC 2.0 error response, used when no method-specific
/// response shape applies (e.g. parse failures, unknown methods).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    /// The version of the JSON-RPC protocol. MUST be exactly "2.0".
    pub jsonrpc: String,
    /// An object describing the error that occurred.
    pub error: JsonRpcError,
    /// The identifier established by the client.
    pub id: Option<JsonRpcId>,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<JsonRpcId>, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error: error.into(),
            id,
        }
    }
}

// ============================================================================
// A2A Error Types
// ============================================================================

/// An error indicating that the server received invalid JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonParseError {
    /// The error code for a JSON parse error.
    pub code: i32, // -32700
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for JsonParseError {
    fn default() -> Self {
        Self {
            code: JSON_PARSE_ERROR_CODE,
            message: JSON_PARSE_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An error indicating that the JSON sent is not a valid Request object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidRequestError {
    /// The error code for an invalid request.
    pub code: i32, // -32600
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for InvalidRequestError {
    fn default() -> Self {
        Self {
            code: INVALID_REQUEST_ERROR_CODE,
            message: INVALID_REQUEST_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An error indicating that the requested method does not exist or is not available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodNotFoundError {
    /// The error code for a method not found error.
    pub code: i32, // -32601
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for MethodNotFoundError {
    fn default() -> Self {
        Self {
            code: METHOD_NOT_FOUND_ERROR_CODE,
            message: METHOD_NOT_FOUND_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An error indicating that the method parameters are invalid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidParamsError {
    /// The error code for an invalid parameters error.
    pub code: i32, // -32602
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for InvalidParamsError {
    fn default() -> Self {
        Self {
            code: INVALID_PARAMS_ERROR_CODE,
            message: INVALID_PARAMS_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An error indicating an internal error on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalError {
    /// The error code for an internal server error.
    pub code: i32, // -32603
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for InternalError {
    fn default() -> Self {
        Self {
            code: INTERNAL_ERROR_CODE,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

impl InternalError {
    /// Creates an internal error carrying a specific message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// An A2A-specific error indicating that the requested task ID was not found.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskNotFoundError {
    /// The error code for a task not found error.
    pub code: i32, // -32001
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for TaskNotFoundError {
    fn default() -> Self {
        Self {
            code: TASK_NOT_FOUND_ERROR_CODE,
            message: TASK_NOT_FOUND_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An A2A-specific error indicating that the task is in a state where it cannot be canceled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskNotCancelableError {
    /// The error code for a task that cannot be canceled.
    pub code: i32, // -32002
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for TaskNotCancelableError {
    fn default() -> Self {
        Self {
            code: TASK_NOT_CANCELABLE_ERROR_CODE,
            message: TASK_NOT_CANCELABLE_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

/// An A2A-specific error indicating an incompatibility between the requested
/// content types and the agent's capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTypeNotSupportedError {
    /// The error code for an unsupported content type.
    pub code: i32, // -32005
    /// The error message.
    pub message: String,
    /// A primitive or structured value containing additional information about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Default for ContentTypeNotSupportedError {
    fn default() -> Self {
        Self {
            code: CONTENT_TYPE_NOT_SUPPORTED_ERROR_CODE,
            message: CONTENT_TYPE_NOT_SUPPORTED_ERROR_MESSAGE.to_string(),
            data: None,
        }
    }
}

macro_rules! impl_into_json_rpc_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for JsonRpcError {
                fn from(error: $error) -> Self {
                    Self {
                        code: error.code,
                        message: error.message,
                        data: error.data,
                    }
                }
            }
        )+
    };
}

impl_into_json_rpc_error!(
    JsonParseError,
    InvalidRequestError,
    MethodNotFoundError,
    InvalidParamsError,
    InternalError,
    TaskNotFoundError,
    TaskNotCancelableError,
    ContentTypeNotSupportedError,
);

// Error code and message constants
pub const JSON_PARSE_ERROR_CODE: i32 = -32700;
pub const JSON_PARSE_ERROR_MESSAGE: &str = "Invalid JSON payload";
pub const INVALID_REQUEST_ERROR_CODE: i32 = -32600;
pub const INVALID_REQUEST_ERROR_MESSAGE: &str = "Request payload validation error";
pub const METHOD_NOT_FOUND_ERROR_CODE: i32 = -32601;
pub const METHOD_NOT_FOUND_ERROR_MESSAGE: &str = "Method not found";
pub const INVALID_PARAMS_ERROR_CODE: i32 = -32602;
pub const INVALID_PARAMS_ERROR_MESSAGE: &str = "Invalid parameters";
pub const INTERNAL_ERROR_CODE: i32 = -32603;
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";
pub const TASK_NOT_FOUND_ERROR_CODE: i32 = -32001;
pub const TASK_NOT_FOUND_ERROR_MESSAGE: &str = "Task not found";
pub const TASK_NOT_CANCELABLE_ERROR_CODE: i32 = -32002;
pub const TASK_NOT_CANCELABLE_ERROR_MESSAGE: &str = "Task cannot be canceled";
pub const CONTENT_TYPE_NOT_SUPPORTED_ERROR_CODE: i32 = -32005;
pub const CONTENT_TYPE_NOT_SUPPORTED_ERROR_MESSAGE: &str = "Incompatible content types";

// ============================================================================
// A2A Core Protocol Types
// ============================================================================

/// Defines the lifecycle states of a Task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// The task has been submitted and is awaiting execution.
    Submitted,
    /// The agent is actively working on the task.
    Working,
    /// The task is paused and waiting for input from the user.
    InputRequired,
    /// The task has been successfully completed.
    Completed,
    /// The task has been canceled by the user.
    Canceled,
    /// The task failed due to an error during execution.
    Failed,
    /// The task is in an unknown or indeterminate state.
    Unknown,
}

/// Represents the status of a task at a specific point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// The current state of the task's lifecycle.
    pub state: TaskState,
    /// An optional, human-readable message providing more details about the current status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// An ISO 8601 datetime string indicating when this status was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Represents a single, stateful unit of work tracked between a client and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// The unique identifier of the task, supplied by the client.
    pub id: String,
    /// A client-generated identifier grouping related tasks into a session.
    #[serde(skip_serializing_if = "Option::is_none", rename = "sessionId")]
    pub session_id: Option<String>,
    /// The current status of the task, including its state and a descriptive message.
    pub status: TaskStatus,
    /// A collection of artifacts generated by the agent during the execution of the task.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub artifacts: Vec<Artifact>,
    /// The messages exchanged during the task, in chronological order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub history: Vec<Message>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Identifies the sender of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// For messages sent by the client/user.
    User,
    /// For messages sent by the agent/service.
    Agent,
}

/// Represents a single message exchanged between a user and an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Identifies the sender of the message. `user` for the client, `agent` for the service.
    pub role: MessageRole,
    /// An array of content parts that form the message body.
    pub parts: Vec<Part>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Message {
    /// Creates an agent-authored message from a list of parts.
    pub fn agent(parts: Vec<Part>) -> Self {
        Self {
            role: MessageRole::Agent,
            parts,
            metadata: None,
        }
    }

    /// Creates a user-authored message with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            parts: vec![Part::text(text)],
            metadata: None,
        }
    }
}

/// A discriminated union representing a part of a message or artifact.
///
/// The closed set of variants keeps exhaustiveness checked at compile time;
/// new content kinds are added here rather than through open-ended payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    /// Represents a text segment.
    Text {
        /// The string content of the text part.
        text: String,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
    /// Represents a file segment.
    File {
        /// The file content, as inline base64 bytes or a URI.
        file: FileContent,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
    /// Represents a structured data segment (e.g., JSON).
    Data {
        /// The structured data content.
        data: serde_json::Value,
        /// Optional metadata associated with this part.
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<Metadata>,
    },
}

impl Part {
    /// Creates a text part without metadata.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// Returns the inner text if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Represents file content carried by a [`Part::File`], provided either
/// directly as base64-encoded bytes or as a URI. Exactly one of `bytes` and
/// `uri` should be populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileContent {
    /// An optional name for the file (e.g., "document.pdf").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The MIME type of the file (e.g., "application/pdf").
    #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
    pub mime_type: Option<String>,
    /// The base64-encoded content of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
    /// A URL pointing to the file's content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Represents a discrete output produced by an agent while executing a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// An optional, human-readable name for the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// An optional, human-readable description of the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// An array of content parts that make up the artifact.
    pub parts: Vec<Part>,
    /// The position of this artifact within the task's output sequence.
    #[serde(default)]
    pub index: i32,
    /// If true, the content should be appended to a previous artifact at the same index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
    /// If true, this is the final chunk of the artifact.
    #[serde(skip_serializing_if = "Option::is_none", rename = "lastChunk")]
    pub last_chunk: Option<bool>,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Artifact {
    /// Creates an artifact from a list of parts at index 0.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            name: None,
            description: None,
            parts,
            index: 0,
            append: None,
            last_chunk: None,
            metadata: None,
        }
    }
}

// ============================================================================
// A2A Method Parameter Types
// ============================================================================

/// Defines the parameters for `tasks/send` and `tasks/sendSubscribe` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSendParams {
    /// The unique identifier of the task, supplied by the client.
    pub id: String,
    /// The session this task belongs to. Generated server-side when omitted.
    #[serde(rename = "sessionId", default = "default_session_id")]
    pub session_id: String,
    /// The message initiating or continuing the task.
    pub message: Message,
    /// A list of output content types the client is prepared to accept.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        rename = "acceptedOutputModes",
        default
    )]
    pub accepted_output_modes: Vec<String>,
    /// The number of most recent messages from the task's history to retrieve.
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<usize>,
    /// Optional metadata associated with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

fn default_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Defines parameters containing a task ID, used for simple task operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskIdParams {
    /// The unique identifier of the task.
    pub id: String,
    /// Optional metadata associated with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Defines parameters for querying a task, with an option to limit history length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskQueryParams {
    /// The unique identifier of the task.
    pub id: String,
    /// The number of most recent messages from the task's history to retrieve.
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<usize>,
    /// Optional metadata associated with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

// ============================================================================
// Streaming Event Types
// ============================================================================

/// An event sent by the agent to notify the client of a change in a task's status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatusUpdateEvent {
    /// The ID of the task that was updated.
    pub id: String,
    /// The new status of the task.
    pub status: TaskStatus,
    /// If true, this is the final event in the stream for this task.
    #[serde(rename = "final", default)]
    pub is_final: bool,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// An event sent by the agent to notify the client that an artifact was produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskArtifactUpdateEvent {
    /// The ID of the task this artifact belongs to.
    pub id: String,
    /// The artifact that was generated or updated.
    pub artifact: Artifact,
    /// Optional metadata for extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// The result payload of one streaming response: either a status update or
/// an artifact update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TaskStreamingResult {
    StatusUpdate(TaskStatusUpdateEvent),
    ArtifactUpdate(TaskArtifactUpdateEvent),
}

impl From<TaskStatusUpdateEvent> for TaskStreamingResult {
    fn from(event: TaskStatusUpdateEvent) -> Self {
        Self::StatusUpdate(event)
    }
}

impl From<TaskArtifactUpdateEvent> for TaskStreamingResult {
    fn from(event: TaskArtifactUpdateEvent) -> Self {
        Self::ArtifactUpdate(event)
    }
}

// ============================================================================
// A2A Response Types
// ============================================================================

/// Represents a JSON-RPC response for the `tasks/send` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTaskResponse {
    /// The version of the JSON-RPC protocol. Always "2.0".
    pub jsonrpc: String,
    /// The identifier established by the client.
    pub id: Option<JsonRpcId>,
    /// The full task snapshot, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Task>,
    /// The error that occurred, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl SendTaskResponse {
    pub fn success(id: Option<JsonRpcId>, task: Task) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(task),
            error: None,
        }
    }

    pub fn error(id: Option<JsonRpcId>, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Represents one JSON-RPC response in a `tasks/sendSubscribe` event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTaskStreamingResponse {
    /// The version of the JSON-RPC protocol. Always "2.0".
    pub jsonrpc: String,
    /// The identifier established by the client.
    pub id: Option<JsonRpcId>,
    /// The streamed event, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskStreamingResult>,
    /// The error that occurred, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl SendTaskStreamingResponse {
    pub fn event(id: Option<JsonRpcId>, result: impl Into<TaskStreamingResult>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result.into()),
            error: None,
        }
    }

    pub fn error(id: Option<JsonRpcId>, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Represents a JSON-RPC response for the `tasks/get` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTaskResponse {
    /// The version of the JSON-RPC protocol. Always "2.0".
    pub jsonrpc: String,
    /// The identifier established by the client.
    pub id: Option<JsonRpcId>,
    /// The task snapshot, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Task>,
    /// The error that occurred, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl GetTaskResponse {
    pub fn success(id: Option<JsonRpcId>, task: Task) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(task),
            error: None,
        }
    }

    pub fn error(id: Option<JsonRpcId>, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Represents a JSON-RPC response for the `tasks/cancel` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelTaskResponse {
    /// The version of the JSON-RPC protocol. Always "2.0".
    pub jsonrpc: String,
    /// The identifier established by the client.
    pub id: Option<JsonRpcId>,
    /// The task snapshot, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Task>,
    /// The error that occurred, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl CancelTaskResponse {
    pub fn error(id: Option<JsonRpcId>, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error.into()),
        }
    }
}

// Protocol constants
pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_SEND_TASK: &str = "tasks/send";
pub const METHOD_SEND_TASK_SUBSCRIBE: &str = "tasks/sendSubscribe";
pub const METHOD_GET_TASK: &str = "tasks/get";
pub const METHOD_CANCEL_TASK: &str = "tasks/cancel";
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_uses_type_discriminator() {
        let part = Part::text("hello");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "hello"}));

        let parsed: Part = serde_json::from_value(json!({
            "type": "data",
            "data": {"answer": 42}
        }))
        .unwrap();
        assert!(matches!(parsed, Part::Data { .. }));
    }

    #[test]
    fn task_serializes_session_id_in_camel_case() {
        let task = Task {
            id: "t1".to_string(),
            session_id: Some("s1".to_string()),
            status: TaskStatus {
                state: TaskState::Submitted,
                message: None,
                timestamp: None,
            },
            artifacts: Vec::new(),
            history: Vec::new(),
            metadata: None,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["sessionId"], json!("s1"));
        assert_eq!(value["status"]["state"], json!("submitted"));
        // Empty collections are omitted from the wire format.
        assert!(value.get("artifacts").is_none());
        assert!(value.get("history").is_none());
    }

    #[test]
    fn status_update_event_serializes_final_flag() {
        let event = TaskStatusUpdateEvent {
            id: "t1".to_string(),
            status: TaskStatus {
                state: TaskState::Completed,
                message: None,
                timestamp: None,
            },
            is_final: true,
            metadata: None,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["final"], json!(true));
        assert_eq!(value["status"]["state"], json!("completed"));
    }

    #[test]
    fn streaming_result_round_trips_both_variants() {
        let status = TaskStreamingResult::StatusUpdate(TaskStatusUpdateEvent {
            id: "t1".to_string(),
            status: TaskStatus {
                state: TaskState::Working,
                message: None,
                timestamp: None,
            },
            is_final: false,
            metadata: None,
        });
        let artifact = TaskStreamingResult::ArtifactUpdate(TaskArtifactUpdateEvent {
            id: "t1".to_string(),
            artifact: Artifact::from_parts(vec![Part::text("output")]),
            metadata: None,
        });

        let status_value = serde_json::to_value(&status).unwrap();
        assert_eq!(status_value["final"], json!(false));
        let parsed: TaskStreamingResult = serde_json::from_value(status_value).unwrap();
        assert!(matches!(parsed, TaskStreamingResult::StatusUpdate(_)));

        let artifact_value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(
            artifact_value["artifact"]["parts"][0]["text"],
            json!("output")
        );
        let parsed: TaskStreamingResult = serde_json::from_value(artifact_value).unwrap();
        assert!(matches!(parsed, TaskStreamingResult::ArtifactUpdate(_)));
    }

    #[test]
    fn send_params_generate_session_id_when_missing() {
        let params: TaskSendParams = serde_json::from_value(json!({
            "id": "t1",
            "message": {
                "role": "user",
                "parts": [{"type": "text", "text": "hi"}]
            }
        }))
        .unwrap();

        assert_eq!(params.id, "t1");
        assert!(!params.session_id.is_empty());
        assert!(params.accepted_output_modes.is_empty());
    }

    #[test]
    fn error_defaults_carry_well_known_codes() {
        let error: JsonRpcError = TaskNotFoundError::default().into();
        assert_eq!(error.code, -32001);
        assert_eq!(error.message, "Task not found");

        let error: JsonRpcError = ContentTypeNotSupportedError::default().into();
        assert_eq!(error.code, -32005);

        let error: JsonRpcError = InternalError::with_message("boom").into();
        assert_eq!(error.code, -32603);
        assert_eq!(error.message, "boom");
    }

    #[test]
    fn send_task_response_omits_absent_fields() {
        let response = SendTaskResponse::error(
            Some(JsonRpcId::Integer(7)),
            InternalError::with_message("agent failure"),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["jsonrpc"], json!("2.0"));
        assert_eq!(value["id"], json!(7));
        assert!(value.get("result").is_none());
        assert_eq!(value["error"]["code"], json!(-32603));
    }
}
