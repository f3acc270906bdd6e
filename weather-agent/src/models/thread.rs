//! Conversation threads for LLM interactions.
//!
//! A [`Thread`] is the full context of a conversation with an LLM: an optional
//! system prompt plus a sequence of events representing the back-and-forth
//! messages.

use serde::{Deserialize, Serialize};

use crate::models::event::Event;

/// A conversation thread containing a system prompt and a sequence of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thread {
    system: Option<String>,
    #[serde(default)]
    events: Vec<Event>,
}

impl Thread {
    /// Creates a new `Thread` from a vector of `Event`s.
    #[must_use]
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            system: None,
            events,
        }
    }

    /// Creates a new `Thread` with an initial system prompt.
    pub fn from_system(content: impl Into<String>) -> Self {
        Self {
            system: Some(content.into()),
            events: Vec::new(),
        }
    }

    /// Creates a new `Thread` with a single user event.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self {
            system: None,
            events: vec![Event::user(content.into())],
        }
    }

    /// Sets or replaces the system prompt.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Adds a single event to the thread.
    #[must_use]
    pub fn add_event(mut self, event: impl Into<Event>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Returns a reference to the system prompt, if any.
    #[must_use]
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Returns a reference to the events in this thread.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the thread and returns both system prompt and events.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Vec<Event>) {
        (self.system, self.events)
    }
}

impl From<&str> for Thread {
    /// Treats the string as a user message.
    fn from(user: &str) -> Self {
        Self::from_user(user)
    }
}

impl From<String> for Thread {
    /// Treats the string as a user message.
    fn from(user: String) -> Self {
        Self::from_user(user)
    }
}

impl From<Event> for Thread {
    /// Creates a `Thread` with a single event.
    fn from(event: Event) -> Self {
        Self::new(vec![event])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn system_and_event_helpers_work() {
        let thread = Thread::from_system("Be concise")
            .add_event(Event::user("Hi"))
            .add_event(Event::assistant("Hello"));

        assert_eq!(thread.system(), Some("Be concise"));
        assert_eq!(thread.events().len(), 2);
        assert_eq!(thread.events()[0].role(), Role::User);
        assert_eq!(thread.events()[1].role(), Role::Assistant);
    }
}
