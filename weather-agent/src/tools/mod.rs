//! Tools and toolsets for agent capabilities.
//!
//! - [`BaseTool`]: the fundamental trait for implementing a tool
//! - [`BaseToolset`]: collections of related tools
//! - [`FunctionTool`]: wrapper turning Rust async closures into tools
//! - [`ToolContext`]: execution context passed to tools

pub mod base_tool;
pub mod base_toolset;
pub mod function_tool;
pub mod tool;
pub mod tool_context;

pub use base_tool::BaseTool;
pub use base_toolset::{BaseToolset, SimpleToolset};
pub use function_tool::FunctionTool;
pub use tool::{FunctionDeclaration, ToolCall, ToolResponse, ToolResult};
pub use tool_context::ToolContext;
