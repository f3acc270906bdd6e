use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::tools::tool::{FunctionDeclaration, ToolResult};
use crate::tools::tool_context::ToolContext;

/// Core trait for all tools in the system.
///
/// Tools provide functionality that the agent can invoke during a
/// conversation. Implementations must be `Send + Sync` to support concurrent
/// usage across async tasks.
#[async_trait]
pub trait BaseTool: Send + Sync {
    /// The name of the tool - must be unique within an agent.
    fn name(&self) -> &str;

    /// Human-readable description of what this tool does.
    fn description(&self) -> &str;

    /// Gets the function declaration for this tool.
    /// This describes the tool's interface to the LLM.
    fn declaration(&self) -> FunctionDeclaration;

    /// Executes the tool with the given arguments and context.
    async fn run_async(&self, args: HashMap<String, Value>, context: &ToolContext) -> ToolResult;
}
