//! A2A weather agent core.
//!
//! An LLM-backed weather assistant exposed through the A2A task protocol:
//! the [`WeatherAgent`] wraps a single tool-using assistant, and the
//! [`WeatherTaskManager`] adapts it to protocol-level task requests backed by
//! a [`TaskStore`].

pub mod agent;
pub mod errors;
pub mod models;
pub mod task;
pub mod tools;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export key types for easier access
pub use agent::{AgentUpdate, WeatherAgent};
pub use errors::{AgentError, AgentResult};
pub use task::{InMemoryTaskStore, TaskStore, TaskSubscription, WeatherTaskManager};
