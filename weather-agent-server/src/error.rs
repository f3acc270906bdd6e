use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failures that occur before a method handler produces its
/// own protocol response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON-RPC request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Error::Json(_) => (StatusCode::BAD_REQUEST, -32700, "Parse error".to_string()),
            Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, -32600, msg.clone()),
            Error::MethodNotFound(method) => (
                StatusCode::NOT_FOUND,
                -32601,
                format!("Method not found: {method}"),
            ),
            Error::InvalidParams(msg) => (StatusCode::BAD_REQUEST, -32602, msg.clone()),
        };

        let body = json!({
            "jsonrpc": "2.0",
            "error": {
                "code": error_code,
                "message": message,
            },
            "id": null
        });

        (status, Json(body)).into_response()
    }
}
