//! Base LLM trait for content generation.
//!
//! This module defines the [`BaseLlm`] trait, which provides a unified
//! interface for interacting with Large Language Model providers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AgentResult;
use crate::models::{LlmResponse, Thread};
use crate::tools::BaseToolset;

/// Base trait for Large Language Model implementations.
///
/// All implementations must be `Send + Sync` to support concurrent usage
/// across async tasks. Implementors should map provider-specific failures
/// into appropriate [`AgentError`](crate::errors::AgentError) variants.
#[async_trait]
pub trait BaseLlm: Send + Sync {
    /// Returns the model identifier for this LLM instance (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;

    /// Generates content in response to a conversation thread.
    ///
    /// Takes the conversation history (including the system prompt) and
    /// optionally a toolset whose declarations are exposed to the model.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider API request fails, authentication is
    /// invalid, the request is rate-limited, or the response cannot be parsed.
    async fn generate_content(
        &self,
        thread: Thread,
        toolset: Option<Arc<dyn BaseToolset>>,
    ) -> AgentResult<LlmResponse>;
}
