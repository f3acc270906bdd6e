//! Content containers for message parts.

use serde::{Deserialize, Serialize};

use crate::models::content_part::ContentPart;
use crate::tools::{ToolCall, ToolResponse};

/// A container for a list of content parts.
///
/// Content represents the payload of a message, which can mix text with tool
/// calls and tool responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content {
    parts: Vec<ContentPart>,
}

impl Content {
    /// Creates a new `Content` from a single text part.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            parts: vec![ContentPart::Text(content.into())],
        }
    }

    /// Creates a new `Content` from a vector of `ContentPart`s.
    pub fn from_parts(parts: impl Into<Vec<ContentPart>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// Pushes a `ContentPart` to the content.
    pub fn push(&mut self, part: impl Into<ContentPart>) {
        self.parts.push(part.into());
    }

    /// Returns a slice of the content parts.
    #[must_use]
    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// Returns all text parts as a vector of `&str`.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.parts.iter().filter_map(|p| p.as_text()).collect()
    }

    /// Returns the first text part, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| p.as_text())
    }

    /// Joins all text parts into a single `String`.
    #[must_use]
    pub fn joined_texts(&self) -> Option<String> {
        let texts = self.texts();
        if texts.is_empty() {
            return None;
        }
        Some(texts.join("\n\n"))
    }

    /// Returns all `ToolCall` parts as a vector of references.
    #[must_use]
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.parts.iter().filter_map(|p| p.as_tool_call()).collect()
    }

    /// Returns `true` if there is at least one `ToolCall` part.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.parts.iter().any(|p| p.as_tool_call().is_some())
    }

    /// Returns `true` if the content has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::from_text(s)
    }
}

impl From<Vec<ToolCall>> for Content {
    fn from(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            parts: tool_calls.into_iter().map(ContentPart::ToolCall).collect(),
        }
    }
}

impl From<ToolResponse> for Content {
    fn from(tool_response: ToolResponse) -> Self {
        Self {
            parts: vec![ContentPart::ToolResponse(tool_response)],
        }
    }
}

impl From<ContentPart> for Content {
    fn from(part: ContentPart) -> Self {
        Self { parts: vec![part] }
    }
}

impl From<Vec<ContentPart>> for Content {
    fn from(parts: Vec<ContentPart>) -> Self {
        Self { parts }
    }
}
