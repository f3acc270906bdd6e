//! Content parts for representing different types of message content.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolCall, ToolResponse};

/// A segment of content in a message exchanged with the LLM: plain text, a
/// tool call made by the model, or a tool response fed back to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContentPart {
    Text(String),
    ToolCall(ToolCall),
    ToolResponse(ToolResponse),
}

impl ContentPart {
    /// Returns a reference to the inner text if this part is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(content) = self {
            Some(content.as_str())
        } else {
            None
        }
    }

    /// Consumes the part and returns the inner text.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        if let Self::Text(content) = self {
            Some(content)
        } else {
            None
        }
    }

    /// Returns a reference to the inner tool call if present.
    #[must_use]
    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        if let Self::ToolCall(tool_call) = self {
            Some(tool_call)
        } else {
            None
        }
    }

    /// Returns a reference to the inner tool response if present.
    #[must_use]
    pub fn as_tool_response(&self) -> Option<&ToolResponse> {
        if let Self::ToolResponse(tool_response) = self {
            Some(tool_response)
        } else {
            None
        }
    }
}

impl From<String> for ContentPart {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ContentPart {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<ToolCall> for ContentPart {
    fn from(tool_call: ToolCall) -> Self {
        Self::ToolCall(tool_call)
    }
}

impl From<ToolResponse> for ContentPart {
    fn from(tool_response: ToolResponse) -> Self {
        Self::ToolResponse(tool_response)
    }
}
