//! Function-based tool implementation.
//!
//! [`FunctionTool`] turns a Rust async closure into a tool that can be called
//! by the LLM, without manually implementing the [`BaseTool`] trait.
//!
//! # Examples
//!
//! ```ignore
//! use weather_agent::tools::{FunctionTool, ToolResult};
//! use serde_json::json;
//!
//! let tool = FunctionTool::new(
//!     "get_weather",
//!     "Get current weather for a location",
//!     |args, _ctx| {
//!         Box::pin(async move {
//!             let location = args.get("location").and_then(|v| v.as_str()).unwrap_or("Unknown");
//!             ToolResult::success(json!({"location": location, "temp": 22}))
//!         })
//!     },
//! )
//! .with_parameters_schema(json!({
//!     "type": "object",
//!     "properties": {
//!         "location": {"type": "string", "description": "City name"}
//!     },
//!     "required": ["location"]
//! }));
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use super::base_tool::BaseTool;
use super::tool::{FunctionDeclaration, ToolResult};
use super::tool_context::ToolContext;

type ToolFuture<'a> = Pin<Box<dyn Future<Output = ToolResult> + Send + 'a>>;

/// Type alias for an async function that can be used as a tool.
pub type AsyncToolFunction =
    Box<dyn for<'a> Fn(HashMap<String, Value>, &'a ToolContext) -> ToolFuture<'a> + Send + Sync>;

/// A tool that wraps a simple async function.
///
/// The function receives arguments as a `HashMap` and returns a [`ToolResult`].
pub struct FunctionTool {
    name: String,
    description: String,
    function: AsyncToolFunction,
    parameters_schema: Value,
}

impl FunctionTool {
    /// Creates a new function tool with the given name, description, and function.
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, function: F) -> Self
    where
        F: for<'a> Fn(HashMap<String, Value>, &'a ToolContext) -> ToolFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            function: Box::new(function),
            parameters_schema: json!({}),
        }
    }

    /// Sets the JSON Schema describing the expected parameters.
    #[must_use]
    pub fn with_parameters_schema(mut self, schema: Value) -> Self {
        self.parameters_schema = schema;
        self
    }
}

#[async_trait]
impl BaseTool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration::new(
            self.name.clone(),
            self.description.clone(),
            self.parameters_schema.clone(),
        )
    }

    async fn run_async(&self, args: HashMap<String, Value>, context: &ToolContext) -> ToolResult {
        (self.function)(args, context).await
    }
}
