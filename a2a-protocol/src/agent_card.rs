use serde::{Deserialize, Serialize};

// ============================================================================
// A2A Agent Card and Discovery Types
// ============================================================================

/// Defines optional capabilities supported by an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCapabilities {
    /// Indicates if the agent supports Server-Sent Events (SSE) for streaming responses.
    #[serde(default)]
    pub streaming: bool,
    /// Indicates if the agent supports sending push notifications for asynchronous task updates.
    #[serde(rename = "pushNotifications", default)]
    pub push_notifications: bool,
    /// Indicates if the agent provides a history of state transitions for a task.
    #[serde(rename = "stateTransitionHistory", default)]
    pub state_transition_history: bool,
}

/// Represents the service provider of an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentProvider {
    /// The name of the agent provider's organization.
    pub organization: String,
    /// A URL for the agent provider's website or relevant documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Represents a distinct capability or function that an agent can perform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSkill {
    /// A unique identifier for the agent's skill.
    pub id: String,
    /// A human-readable name for the skill.
    pub name: String,
    /// A detailed description of the skill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A set of keywords describing the skill's capabilities.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    /// Example prompts or scenarios that this skill can handle.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
    /// The set of supported input content types for this skill, overriding the agent's defaults.
    #[serde(skip_serializing_if = "Vec::is_empty", rename = "inputModes", default)]
    pub input_modes: Vec<String>,
    /// The set of supported output content types for this skill, overriding the agent's defaults.
    #[serde(skip_serializing_if = "Vec::is_empty", rename = "outputModes", default)]
    pub output_modes: Vec<String>,
}

/// The AgentCard is a self-describing manifest for an agent, served from the
/// well-known discovery path so other agents can find and negotiate with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCard {
    /// A human-readable name for the agent.
    pub name: String,
    /// A human-readable description of the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The preferred endpoint URL for interacting with the agent.
    pub url: String,
    /// Information about the agent's service provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,
    /// The agent's own version number.
    pub version: String,
    /// An optional URL to the agent's documentation.
    #[serde(skip_serializing_if = "Option::is_none", rename = "documentationUrl")]
    pub documentation_url: Option<String>,
    /// A declaration of optional capabilities supported by the agent.
    pub capabilities: AgentCapabilities,
    /// Default set of supported input content types for all skills.
    #[serde(rename = "defaultInputModes", default = "default_modes")]
    pub default_input_modes: Vec<String>,
    /// Default set of supported output content types for all skills.
    #[serde(rename = "defaultOutputModes", default = "default_modes")]
    pub default_output_modes: Vec<String>,
    /// The set of skills that the agent can perform.
    pub skills: Vec<AgentSkill>,
}

fn default_modes() -> Vec<String> {
    vec!["text".to_string()]
}

impl AgentCard {
    /// Sets the preferred endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the agent version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enables or disables the streaming capability.
    #[must_use]
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.capabilities.streaming = streaming;
        self
    }
}
