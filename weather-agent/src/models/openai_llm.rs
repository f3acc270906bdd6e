//! `OpenAI` LLM provider implementation.
//!
//! API Documentation: <https://platform.openai.com/docs/api-reference/chat>
//! Model Names: <https://platform.openai.com/docs/models>

use std::sync::Arc;

use serde_json::{json, Value};

use crate::errors::{AgentError, AgentResult};
use crate::models::{BaseLlm, ContentPart, LlmResponse, Role, Thread, TokenUsage};
use crate::models::content::Content;
use crate::tools::{BaseToolset, ToolCall};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// `OpenAI` LLM implementation.
///
/// Provides access to GPT models through the `OpenAI` Chat Completions API,
/// including tool use.
///
/// # Authentication
///
/// The API key can be provided explicitly or loaded from the `OPENAI_API_KEY`
/// environment variable via [`from_env`](OpenAiLlm::from_env).
///
/// # Examples
///
/// ```ignore
/// use weather_agent::models::{BaseLlm, OpenAiLlm, Thread};
///
/// let llm = OpenAiLlm::from_env("gpt-4o-mini")?;
/// let thread = Thread::from_user("What's the weather in Tokyo?");
/// let response = llm.generate_content(thread, None).await?;
/// println!("{}", response.content().first_text().unwrap_or("No response"));
/// ```
pub struct OpenAiLlm {
    model_name: String,
    api_key: String,
    base_url: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAiLlm {
    /// Environment variable name for the `OpenAI` API key.
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";

    /// Creates a new `OpenAI` LLM instance with an explicit API key.
    pub fn new(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Creates a new `OpenAI` LLM instance loading the API key from the
    /// `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or is empty.
    pub fn from_env(model_name: impl Into<String>) -> AgentResult<Self> {
        let api_key =
            std::env::var(Self::API_KEY_ENV).map_err(|_| AgentError::MissingConfiguration {
                field: Self::API_KEY_ENV.to_string(),
            })?;

        if api_key.is_empty() {
            return Err(AgentError::InvalidConfiguration {
                field: Self::API_KEY_ENV.to_string(),
                reason: "API key cannot be empty".to_string(),
            });
        }

        Ok(Self::new(model_name, api_key))
    }

    /// Sets a custom base URL for the API endpoint.
    ///
    /// Useful for OpenAI-compatible APIs or when using a proxy/gateway.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the temperature for generation (0.0 to 2.0).
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Converts a Thread into `OpenAI` API request format.
    async fn build_request_payload(
        &self,
        thread: Thread,
        toolset: Option<Arc<dyn BaseToolset>>,
    ) -> AgentResult<Value> {
        let (system_prompt, events) = thread.into_parts();

        let mut messages = Vec::new();

        if let Some(system) = system_prompt {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }

        for event in events {
            let (role, content) = event.into_parts();

            match role {
                Role::System | Role::User => {
                    let role_str = if matches!(role, Role::System) {
                        "system"
                    } else {
                        "user"
                    };
                    let text = content.joined_texts().unwrap_or_default();
                    messages.push(json!({
                        "role": role_str,
                        "content": text
                    }));
                }
                Role::Assistant => {
                    // Assistant messages can carry text and tool_calls
                    let mut texts = Vec::new();
                    let mut tool_calls = Vec::new();

                    for part in content.parts() {
                        match part {
                            ContentPart::Text(text) => texts.push(text.clone()),
                            ContentPart::ToolCall(tool_call) => {
                                tool_calls.push(json!({
                                    "type": "function",
                                    "id": tool_call.id(),
                                    "function": {
                                        "name": tool_call.name(),
                                        "arguments": tool_call.arguments().to_string()
                                    }
                                }));
                            }
                            ContentPart::ToolResponse(_) => {} // Handled as Tool role
                        }
                    }

                    let mut message = json!({
                        "role": "assistant",
                        "content": texts.join("\n\n")
                    });

                    if !tool_calls.is_empty() {
                        message["tool_calls"] = json!(tool_calls);
                    }

                    messages.push(message);
                }
                Role::Tool => {
                    // Tool responses go as role: "tool" with tool_call_id
                    for part in content.parts() {
                        if let ContentPart::ToolResponse(tool_response) = part {
                            let result = tool_response.result();
                            let content_value = if result.success {
                                result.data.to_string()
                            } else {
                                json!({
                                    "error": result
                                        .error_message
                                        .as_deref()
                                        .unwrap_or("Unknown error")
                                })
                                .to_string()
                            };

                            messages.push(json!({
                                "role": "tool",
                                "content": content_value,
                                "tool_call_id": tool_response.tool_call_id()
                            }));
                        }
                    }
                }
            }
        }

        let mut payload = json!({
            "model": self.model_name,
            "messages": messages
        });

        if let Some(temperature) = self.temperature {
            payload["temperature"] = json!(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }

        if let Some(toolset) = toolset {
            let tools_list = toolset.get_tools().await;
            if !tools_list.is_empty() {
                let tools: Vec<Value> = tools_list
                    .iter()
                    .map(|tool| {
                        let decl = tool.declaration();
                        json!({
                            "type": "function",
                            "function": {
                                "name": decl.name(),
                                "description": decl.description(),
                                "parameters": decl.parameters(),
                                "strict": false
                            }
                        })
                    })
                    .collect();

                payload["tools"] = json!(tools);
            }
        }

        Ok(payload)
    }

    /// Parses `OpenAI` API response into Content.
    fn parse_response(&self, response_body: &Value) -> AgentResult<Content> {
        let mut content = Content::default();

        let first_choice = response_body
            .get("choices")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .ok_or_else(|| AgentError::LlmProvider {
                provider: "OpenAI".to_string(),
                message: "Missing or invalid 'choices' field in response".to_string(),
            })?;

        let message = first_choice
            .get("message")
            .ok_or_else(|| AgentError::LlmProvider {
                provider: "OpenAI".to_string(),
                message: "Missing 'message' field in choice".to_string(),
            })?;

        if let Some(text) = message.get("content").and_then(|v| v.as_str()) {
            if !text.trim().is_empty() {
                content.push(ContentPart::Text(text.trim().to_string()));
            }
        }

        if let Some(tool_calls) = message.get("tool_calls").and_then(|v| v.as_array()) {
            for tool_call in tool_calls {
                let id = tool_call
                    .get("id")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| AgentError::LlmProvider {
                        provider: "OpenAI".to_string(),
                        message: "Missing 'id' in tool call".to_string(),
                    })?;

                let function =
                    tool_call
                        .get("function")
                        .ok_or_else(|| AgentError::LlmProvider {
                            provider: "OpenAI".to_string(),
                            message: "Missing 'function' in tool call".to_string(),
                        })?;

                let name = function
                    .get("name")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| AgentError::LlmProvider {
                        provider: "OpenAI".to_string(),
                        message: "Missing 'name' in tool call function".to_string(),
                    })?;

                // Arguments arrive as a JSON-encoded string or an object
                let arguments = function.get("arguments").cloned().unwrap_or(Value::Null);
                let arguments = match arguments {
                    Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::Null),
                    other => other,
                };

                content.push(ContentPart::ToolCall(ToolCall::new(id, name, arguments)));
            }
        }

        Ok(content)
    }

    /// Parses token usage from `OpenAI` API response.
    fn parse_usage(&self, response_body: &Value) -> TokenUsage {
        let usage_obj = match response_body.get("usage") {
            Some(obj) => obj,
            None => return TokenUsage::empty(),
        };

        let prompt_tokens = usage_obj
            .get("prompt_tokens")
            .and_then(Value::as_u64)
            .map(|v| v as u32);

        let completion_tokens = usage_obj
            .get("completion_tokens")
            .and_then(Value::as_u64)
            .map(|v| v as u32);

        let total_tokens = usage_obj
            .get("total_tokens")
            .and_then(Value::as_u64)
            .map(|v| v as u32);

        TokenUsage::partial(prompt_tokens, completion_tokens, total_tokens)
    }
}

#[async_trait::async_trait]
impl BaseLlm for OpenAiLlm {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate_content(
        &self,
        thread: Thread,
        toolset: Option<Arc<dyn BaseToolset>>,
    ) -> AgentResult<LlmResponse> {
        let payload = self.build_request_payload(thread, toolset).await?;

        let client = reqwest::Client::new();

        let response = client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 | 403 => AgentError::LlmAuthentication {
                    provider: "OpenAI".to_string(),
                },
                429 => AgentError::LlmRateLimit {
                    provider: "OpenAI".to_string(),
                },
                _ => AgentError::LlmProvider {
                    provider: "OpenAI".to_string(),
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let response_body: Value = response.json().await?;

        let content = self.parse_response(&response_body)?;
        let usage = self.parse_usage(&response_body);

        Ok(LlmResponse::new(content, usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;
    use crate::tools::{FunctionTool, SimpleToolset, ToolResult};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn weather_toolset() -> Arc<dyn BaseToolset> {
        let tool = FunctionTool::new("get_weather", "Get current weather", |_args, _ctx| {
            Box::pin(async { ToolResult::success(json!({"temp": 22})) })
        })
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {"location": {"type": "string"}},
            "required": ["location"]
        }));
        Arc::new(SimpleToolset::new(vec![
            Arc::new(tool) as Arc<dyn crate::tools::BaseTool>
        ]))
    }

    #[tokio::test]
    async fn build_request_payload_serializes_messages_and_tools() {
        let llm = OpenAiLlm::new("gpt-test", "api-key")
            .with_max_tokens(256)
            .with_temperature(0.5);

        let thread = Thread::from_system("Guide the assistant")
            .add_event(Event::user("Hello"))
            .add_event(Event::assistant("Working"));

        let payload = llm
            .build_request_payload(thread, Some(weather_toolset()))
            .await
            .expect("payload");

        assert_eq!(payload["model"], json!("gpt-test"));
        assert_eq!(payload["max_tokens"], json!(256));
        assert_eq!(payload["temperature"], json!(0.5));

        let messages = payload["messages"].as_array().expect("messages array");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], json!("system"));
        assert_eq!(messages[1]["role"], json!("user"));
        assert!(messages[2]["content"].as_str().unwrap().contains("Working"));

        let tools = payload["tools"].as_array().expect("tools array");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["function"]["name"], json!("get_weather"));
    }

    #[test]
    fn parse_response_extracts_text_and_tool_calls() {
        let llm = OpenAiLlm::new("gpt-test", "api-key");
        let body = json!({
            "choices": [
                {
                    "message": {
                        "content": "Hello user",
                        "tool_calls": [
                            {
                                "id": "call-1",
                                "function": {
                                    "name": "get_weather",
                                    "arguments": "{\"location\":\"Tokyo\"}"
                                }
                            }
                        ]
                    }
                }
            ],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        });

        let content = llm.parse_response(&body).expect("content");
        assert_eq!(content.first_text(), Some("Hello user"));
        let calls = content.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name(), "get_weather");
        assert_eq!(calls[0].arguments()["location"], json!("Tokyo"));

        let usage = llm.parse_usage(&body);
        assert_eq!(usage.input_tokens(), 10);
        assert_eq!(usage.output_tokens(), 5);
        assert_eq!(usage.total_tokens(), 15);
    }

    #[test]
    fn parse_response_missing_choices_returns_provider_error() {
        let llm = OpenAiLlm::new("gpt-test", "api-key");
        let err = llm.parse_response(&json!({})).expect_err("expected failure");
        match err {
            AgentError::LlmProvider { provider, .. } => assert_eq!(provider, "OpenAI"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_content_round_trips_through_http() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "The weather is sunny. TERMINATE"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let llm = OpenAiLlm::new("gpt-test", "test-key")
            .with_base_url(format!("{}/v1/chat/completions", server.uri()));

        let response = llm
            .generate_content(Thread::from_user("Weather in Tokyo?"), None)
            .await
            .expect("response");

        assert_eq!(
            response.content().first_text(),
            Some("The weather is sunny. TERMINATE")
        );
        assert_eq!(response.usage().total_tokens(), 20);
    }

    #[tokio::test]
    async fn generate_content_maps_auth_and_rate_limit_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let llm = OpenAiLlm::new("gpt-test", "bad-key").with_base_url(server.uri());
        let err = llm
            .generate_content(Thread::from_user("hi"), None)
            .await
            .expect_err("should fail");
        assert!(matches!(err, AgentError::LlmAuthentication { .. }));

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let llm = OpenAiLlm::new("gpt-test", "test-key").with_base_url(server.uri());
        let err = llm
            .generate_content(Thread::from_user("hi"), None)
            .await
            .expect_err("should fail");
        assert!(matches!(err, AgentError::LlmRateLimit { .. }));
    }
}
