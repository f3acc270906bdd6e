//! Shared fixtures and helpers for tests.
//!
//! Available when running tests or when the `test-support` feature is
//! enabled, so downstream crates can reuse the fakes without them leaking
//! into the default public surface.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{AgentError, AgentResult};
use crate::models::{BaseLlm, Content, LlmResponse, Thread, TokenUsage};
use crate::tools::{BaseToolset, ToolCall};

/// A simple LLM implementation that returns pre-seeded responses.
///
/// Tests seed responses up-front and verify the inputs by inspecting
/// [`FakeLlm::calls`]. When responses are exhausted the fake surfaces an
/// internal error so missing expectations are obvious.
#[derive(Clone)]
pub struct FakeLlm {
    model_name: String,
    responses: Arc<Mutex<VecDeque<AgentResult<LlmResponse>>>>,
    calls: Arc<Mutex<Vec<Thread>>>,
}

impl FakeLlm {
    /// Creates a fake LLM that dequeues the provided responses.
    #[must_use]
    pub fn with_responses<I>(model_name: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = AgentResult<LlmResponse>>,
    {
        Self {
            model_name: model_name.into(),
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pushes an additional response to the back of the queue.
    pub fn push_response(&self, response: AgentResult<LlmResponse>) {
        self.responses
            .lock()
            .expect("fake LLM responses mutex poisoned")
            .push_back(response);
    }

    /// Returns the threads the fake has been asked to process so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Thread> {
        self.calls
            .lock()
            .expect("fake LLM calls mutex poisoned")
            .clone()
    }

    /// Returns the number of times the fake model has been invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .expect("fake LLM calls mutex poisoned")
            .len()
    }

    /// Creates a successful LLM response from plain text for convenience.
    #[must_use]
    pub fn text_response(text: impl Into<String>) -> AgentResult<LlmResponse> {
        Ok(LlmResponse::new(
            Content::from_text(text),
            TokenUsage::empty(),
        ))
    }

    /// Creates a successful response containing a single tool call.
    #[must_use]
    pub fn tool_call_response(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> AgentResult<LlmResponse> {
        Ok(LlmResponse::new(
            Content::from(vec![ToolCall::new(id, name, arguments)]),
            TokenUsage::empty(),
        ))
    }
}

#[async_trait]
impl BaseLlm for FakeLlm {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate_content(
        &self,
        thread: Thread,
        _toolset: Option<Arc<dyn BaseToolset>>,
    ) -> AgentResult<LlmResponse> {
        self.calls
            .lock()
            .expect("fake LLM calls mutex poisoned")
            .push(thread);

        self.responses
            .lock()
            .expect("fake LLM responses mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(AgentError::Internal {
                    component: "FakeLlm".to_string(),
                    reason: "No more fake responses queued".to_string(),
                })
            })
    }
}
