//! Events representing messages in a conversation thread.

use serde::{Deserialize, Serialize};

use crate::models::content::Content;
use crate::tools::{ToolCall, ToolResponse};

/// The role of a participant in a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single event in a conversation thread.
///
/// An event represents a single message or interaction in a conversation,
/// with an associated role indicating who/what generated the content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    role: Role,
    content: Content,
}

impl Event {
    /// Creates a new `Event` with a `User` role.
    pub fn user(content: impl Into<Content>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new `Event` with an `Assistant` role.
    pub fn assistant(content: impl Into<Content>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Returns the role of this event.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns a reference to the content of this event.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Consumes the event and returns both role and content.
    #[must_use]
    pub fn into_parts(self) -> (Role, Content) {
        (self.role, self.content)
    }
}

impl From<Vec<ToolCall>> for Event {
    fn from(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::from(tool_calls),
        }
    }
}

impl From<ToolResponse> for Event {
    fn from(value: ToolResponse) -> Self {
        Self {
            role: Role::Tool,
            content: Content::from(value),
        }
    }
}
