//! The conversational weather agent.
//!
//! [`WeatherAgent`] adapts a single tool-using LLM assistant to the two call
//! shapes the task manager needs: a one-shot [`invoke`](WeatherAgent::invoke)
//! and a streaming [`stream`](WeatherAgent::stream). Each call runs a fresh
//! multi-turn tool loop ended by a termination rule: the assistant mentions
//! the stop phrase, or the conversation reaches the message cap.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_stream::try_stream;
use futures::Stream;
use serde_json::Value;

use crate::agent::weather::weather_tool;
use crate::errors::{AgentError, AgentResult};
use crate::models::{BaseLlm, Event, LlmResponse, OpenAiLlm, Thread};
use crate::tools::{
    BaseTool, BaseToolset, SimpleToolset, ToolCall, ToolContext, ToolResponse,
};

/// Model used when constructing the agent from the environment.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Phrase the assistant is instructed to end its final message with.
const STOP_PHRASE: &str = "TERMINATE";

/// Cap on the total number of messages (the task message plus assistant
/// turns) in one run.
const MAX_MESSAGES: usize = 5;

const PROCESSING_NOTICE: &str = "Processing your weather request...";

const FALLBACK_RESPONSE: &str = "I couldn't process your weather request.";

const SYSTEM_INSTRUCTIONS: &str = "You are a helpful weather assistant that can provide weather information. \
     Use the get_weather tool to look up current weather. \
     If the user asks about anything other than weather, respond to them very briefly but also \
     politely let them know that you can only provide weather information. \
     Once you have responded to the user, end with 'TERMINATE'.";

/// Why a run of the chat loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The assistant mentioned the stop phrase.
    StopPhrase(String),
    /// The conversation reached the message cap.
    MaxMessages(usize),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StopPhrase(phrase) => write!(f, "Text '{phrase}' mentioned"),
            Self::MaxMessages(limit) => write!(f, "Maximum number of messages {limit} reached"),
        }
    }
}

/// One record in the sequence produced by [`WeatherAgent::stream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentUpdate {
    /// True only for the single final record of a run.
    pub is_task_complete: bool,
    /// True when the agent is paused waiting for more input from the user.
    pub require_user_input: bool,
    /// Text payload of this update.
    pub content: String,
}

impl AgentUpdate {
    fn working(content: impl Into<String>) -> Self {
        Self {
            is_task_complete: false,
            require_user_input: false,
            content: content.into(),
        }
    }

    fn completed(content: impl Into<String>) -> Self {
        Self {
            is_task_complete: true,
            require_user_input: false,
            content: content.into(),
        }
    }
}

/// A single LLM assistant with the weather tool attached.
///
/// Runs have no conversation memory across calls: the `session_id` parameter
/// is accepted for protocol symmetry but does not thread context between
/// invocations.
pub struct WeatherAgent {
    model: Arc<dyn BaseLlm>,
    toolset: Arc<dyn BaseToolset>,
    system_instructions: String,
    stop_phrase: String,
    max_messages: usize,
    call_timeout: Option<Duration>,
}

impl WeatherAgent {
    /// Output content types this agent can produce.
    pub const SUPPORTED_CONTENT_TYPES: &'static [&'static str] = &["text", "text/plain"];

    /// Creates the agent around the given model with the weather tool attached.
    pub fn new(model: impl BaseLlm + 'static) -> Self {
        let toolset = SimpleToolset::new(vec![Arc::new(weather_tool()) as Arc<dyn BaseTool>]);
        Self {
            model: Arc::new(model),
            toolset: Arc::new(toolset),
            system_instructions: SYSTEM_INSTRUCTIONS.to_string(),
            stop_phrase: STOP_PHRASE.to_string(),
            max_messages: MAX_MESSAGES,
            call_timeout: None,
        }
    }

    /// Creates the agent backed by `OpenAI`, reading the API key from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `OPENAI_API_KEY` is unset or empty.
    pub fn from_env() -> AgentResult<Self> {
        Ok(Self::new(OpenAiLlm::from_env(DEFAULT_MODEL)?))
    }

    /// Bounds each outbound model call with a timeout.
    ///
    /// Unset by default: a slow model call then blocks its request
    /// indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Runs the assistant to completion and returns the text of the final
    /// produced message.
    ///
    /// Returns a fixed fallback sentence when the loop terminates without the
    /// assistant producing any text. Errors from the model or a tool propagate
    /// to the caller; nothing is retried.
    pub async fn invoke(&self, query: &str, session_id: &str) -> AgentResult<String> {
        tracing::debug!(session_id, "running weather agent to completion");

        let tools = self.tool_map().await;
        let context = ToolContext::new().with_session_id(session_id);
        let mut thread =
            Thread::from_system(self.system_instructions.clone()).add_event(Event::user(query));
        let mut messages = 1usize; // the inbound task message
        let mut last_text: Option<String> = None;

        loop {
            let (next_thread, text) = self.step(thread, &tools, &context).await?;
            thread = next_thread;
            messages += 1;

            if let Some(text) = text {
                let stop_seen = text.contains(&self.stop_phrase);
                last_text = Some(text);
                if stop_seen {
                    break;
                }
            }
            if messages >= self.max_messages {
                break;
            }
        }

        Ok(last_text.unwrap_or_else(|| FALLBACK_RESPONSE.to_string()))
    }

    /// Runs the assistant and yields progress as it goes.
    ///
    /// The sequence starts with an immediate processing notice, continues with
    /// one non-final update per assistant message, and ends with exactly one
    /// final record summarizing the termination reason. The sequence is finite
    /// and not restartable; an error ends it immediately.
    pub fn stream(
        &self,
        query: String,
        session_id: String,
    ) -> impl Stream<Item = AgentResult<AgentUpdate>> + Send + '_ {
        try_stream! {
            tracing::debug!(session_id = %session_id, "streaming weather agent run");
            yield AgentUpdate::working(PROCESSING_NOTICE);

            let tools = self.tool_map().await;
            let context = ToolContext::new().with_session_id(session_id);
            let mut thread = Thread::from_system(self.system_instructions.clone())
                .add_event(Event::user(query));
            let mut messages = 1usize;

            let reason;
            loop {
                let (next_thread, text) = self.step(thread, &tools, &context).await?;
                thread = next_thread;
                messages += 1;

                if let Some(text) = text {
                    let stop_seen = text.contains(&self.stop_phrase);
                    yield AgentUpdate::working(text);
                    if stop_seen {
                        reason = TerminationReason::StopPhrase(self.stop_phrase.clone());
                        break;
                    }
                }
                if messages >= self.max_messages {
                    reason = TerminationReason::MaxMessages(self.max_messages);
                    break;
                }
            }

            yield AgentUpdate::completed(format!(
                "Task completed successfully. Reason: {reason}"
            ));
        }
    }

    /// One model turn: generate, execute any requested tool calls, and return
    /// the extended thread plus the assistant's text for this turn.
    async fn step(
        &self,
        thread: Thread,
        tools: &HashMap<String, Arc<dyn BaseTool>>,
        context: &ToolContext,
    ) -> AgentResult<(Thread, Option<String>)> {
        let response = self.generate(thread.clone()).await?;
        let content = response.into_content();
        let text = content.joined_texts();
        let tool_calls: Vec<ToolCall> = content.tool_calls().into_iter().cloned().collect();

        let mut thread = thread.add_event(Event::assistant(content));

        for call in tool_calls {
            let tool = tools
                .get(call.name())
                .ok_or_else(|| AgentError::ToolNotFound {
                    tool_name: call.name().to_string(),
                })?;
            let args = arguments_map(call.name(), call.arguments())?;

            tracing::debug!(tool = call.name(), "executing tool call");
            let result = tool.run_async(args, context).await;
            thread = thread.add_event(Event::from(ToolResponse::new(call.id(), result)));
        }

        Ok((thread, text))
    }

    async fn generate(&self, thread: Thread) -> AgentResult<LlmResponse> {
        let call = self.model.generate_content(thread, Some(self.toolset.clone()));
        match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                AgentError::Timeout {
                    operation: "llm_generate".to_string(),
                    duration_ms: limit.as_millis() as u64,
                }
            })?,
            None => call.await,
        }
    }

    async fn tool_map(&self) -> HashMap<String, Arc<dyn BaseTool>> {
        self.toolset
            .get_tools()
            .await
            .into_iter()
            .map(|tool| (tool.name().to_string(), tool))
            .collect()
    }
}

fn arguments_map(tool_name: &str, value: &Value) -> AgentResult<HashMap<String, Value>> {
    match value {
        Value::Null => Ok(HashMap::new()),
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        _ => Err(AgentError::ToolValidationError {
            tool_name: tool_name.to_string(),
            reason: "Tool arguments must be a JSON object".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentPart, Role};
    use crate::test_support::FakeLlm;
    use futures::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn invoke_returns_final_text_on_stop_phrase() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [FakeLlm::text_response(
                "The weather in Tokyo is Rainy. TERMINATE",
            )],
        );
        let agent = WeatherAgent::new(model.clone());

        let answer = agent.invoke("Weather in Tokyo?", "s1").await.unwrap();
        assert_eq!(answer, "The weather in Tokyo is Rainy. TERMINATE");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn invoke_executes_weather_tool_before_final_answer() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [
                FakeLlm::tool_call_response("call-1", "get_weather", json!({"location": "Tokyo"})),
                FakeLlm::text_response(
                    "The weather in Tokyo is Rainy with a temperature of 28°C and humidity of 75%. TERMINATE",
                ),
            ],
        );
        let agent = WeatherAgent::new(model.clone());

        let answer = agent.invoke("Weather in Tokyo?", "s1").await.unwrap();
        assert!(answer.contains("Rainy"));
        assert_eq!(model.call_count(), 2);

        // The second model call must have seen the tool's real output.
        let second_thread = &model.calls()[1];
        let tool_output = second_thread
            .events()
            .iter()
            .filter(|event| event.role() == Role::Tool)
            .flat_map(|event| event.content().parts())
            .find_map(|part| match part {
                ContentPart::ToolResponse(response) => response.result().data.as_str(),
                _ => None,
            })
            .expect("tool response recorded in thread");
        assert!(tool_output.contains("Tokyo"));
        assert!(tool_output.contains("28"));
    }

    #[tokio::test]
    async fn invoke_stops_at_message_cap() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [
                FakeLlm::text_response("thinking about it"),
                FakeLlm::text_response("still thinking"),
                FakeLlm::text_response("almost there"),
                FakeLlm::text_response("final answer without the phrase"),
            ],
        );
        let agent = WeatherAgent::new(model.clone());

        let answer = agent.invoke("Weather?", "s1").await.unwrap();
        assert_eq!(answer, "final answer without the phrase");
        // Task message + 4 assistant turns hits the cap of 5.
        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test]
    async fn invoke_falls_back_when_no_text_was_produced() {
        let tool_turn =
            || FakeLlm::tool_call_response("call-1", "get_weather", json!({"location": "Paris"}));
        let model = FakeLlm::with_responses(
            "fake-model",
            [tool_turn(), tool_turn(), tool_turn(), tool_turn()],
        );
        let agent = WeatherAgent::new(model);

        let answer = agent.invoke("Weather?", "s1").await.unwrap();
        assert_eq!(answer, "I couldn't process your weather request.");
    }

    #[tokio::test]
    async fn invoke_propagates_model_errors() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [Err(AgentError::LlmRateLimit {
                provider: "OpenAI".to_string(),
            })],
        );
        let agent = WeatherAgent::new(model);

        let err = agent.invoke("Weather?", "s1").await.unwrap_err();
        assert!(matches!(err, AgentError::LlmRateLimit { .. }));
    }

    #[tokio::test]
    async fn stream_yields_processing_updates_then_final() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [FakeLlm::text_response("Sunny in Sydney. TERMINATE")],
        );
        let agent = WeatherAgent::new(model);

        let updates: Vec<_> = agent
            .stream("Weather in Sydney?".to_string(), "s1".to_string())
            .collect()
            .await;
        let updates: Vec<AgentUpdate> =
            updates.into_iter().collect::<AgentResult<_>>().unwrap();

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].content, "Processing your weather request...");
        assert!(!updates[0].is_task_complete);
        assert_eq!(updates[1].content, "Sunny in Sydney. TERMINATE");
        assert!(!updates[1].is_task_complete);
        assert!(updates[2].is_task_complete);
        assert_eq!(
            updates[2].content,
            "Task completed successfully. Reason: Text 'TERMINATE' mentioned"
        );
    }

    #[tokio::test]
    async fn stream_reports_message_cap_termination() {
        let model = FakeLlm::with_responses(
            "fake-model",
            [
                FakeLlm::text_response("one"),
                FakeLlm::text_response("two"),
                FakeLlm::text_response("three"),
                FakeLlm::text_response("four"),
            ],
        );
        let agent = WeatherAgent::new(model);

        let updates: Vec<AgentUpdate> = agent
            .stream("Weather?".to_string(), "s1".to_string())
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<AgentResult<_>>()
            .unwrap();

        let finals: Vec<_> = updates.iter().filter(|u| u.is_task_complete).collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(
            finals[0].content,
            "Task completed successfully. Reason: Maximum number of messages 5 reached"
        );
        // Processing notice + 4 assistant updates precede the final record.
        assert_eq!(updates.len(), 6);
    }

    #[tokio::test]
    async fn stream_ends_on_model_error() {
        let model = FakeLlm::with_responses("fake-model", []);
        let agent = WeatherAgent::new(model);

        let items: Vec<_> = agent
            .stream("Weather?".to_string(), "s1".to_string())
            .collect()
            .await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn timeout_surfaces_as_timeout_error() {
        struct StallingLlm;

        #[async_trait::async_trait]
        impl BaseLlm for StallingLlm {
            fn model_name(&self) -> &str {
                "stalling"
            }

            async fn generate_content(
                &self,
                _thread: Thread,
                _toolset: Option<Arc<dyn BaseToolset>>,
            ) -> AgentResult<LlmResponse> {
                futures::future::pending().await
            }
        }

        let agent = WeatherAgent::new(StallingLlm).with_timeout(Duration::from_millis(20));
        let err = agent.invoke("Weather?", "s1").await.unwrap_err();
        assert!(matches!(err, AgentError::Timeout { .. }));
    }
}
