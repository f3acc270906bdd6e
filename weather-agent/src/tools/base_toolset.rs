//! Toolset abstractions for grouping related tools.

use std::sync::Arc;

use async_trait::async_trait;

use super::base_tool::BaseTool;

/// Base trait for toolsets - collections of related tools.
///
/// Toolsets group tools together and manage their lifecycle. Implementations
/// can provide tools from various sources (in-memory collections, remote
/// registries, etc.).
#[async_trait]
pub trait BaseToolset: Send + Sync {
    /// Returns all tools in the toolset.
    async fn get_tools(&self) -> Vec<Arc<dyn BaseTool>>;

    /// Performs cleanup and releases resources held by the toolset.
    ///
    /// For simple in-memory toolsets this is a no-op; toolsets backed by
    /// external services close their connections here.
    async fn close(&self);
}

/// Default implementation of `BaseToolset` for simple collections of tools.
#[derive(Default)]
pub struct SimpleToolset {
    tools: Vec<Arc<dyn BaseTool>>,
}

impl SimpleToolset {
    pub fn new<T>(tools: T) -> Self
    where
        T: IntoIterator<Item = Arc<dyn BaseTool>>,
    {
        Self {
            tools: tools.into_iter().collect(),
        }
    }

    /// Builder-style helper to add a tool while consuming the toolset.
    #[must_use]
    pub fn with_tool(mut self, tool: Arc<dyn BaseTool>) -> Self {
        self.tools.push(tool);
        self
    }
}

#[async_trait]
impl BaseToolset for SimpleToolset {
    async fn get_tools(&self) -> Vec<Arc<dyn BaseTool>> {
        self.tools.clone()
    }

    async fn close(&self) {
        // Simple toolset doesn't need cleanup
    }
}
