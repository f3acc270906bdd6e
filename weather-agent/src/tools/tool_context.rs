//! Execution context passed to tools.

/// Context available to a tool while it runs.
///
/// Carries request-scoped information such as the protocol session id. Tools
/// that do not need any context simply ignore it.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    session_id: Option<String>,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the protocol session id of the request being served.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
