use async_trait::async_trait;

use a2a_protocol::{Artifact, Task, TaskSendParams, TaskStatus};

use crate::errors::AgentResult;

/// Abstraction for task persistence.
///
/// The store owns the authoritative record of every task the agent has seen.
/// All operations are atomic per task id, so concurrent requests for
/// unrelated tasks never contend with each other.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates the task record for the given send parameters, or merges the
    /// incoming message into an existing record with the same id.
    ///
    /// New tasks start in the `Submitted` state with the inbound message as
    /// the first history entry.
    async fn upsert_task(&self, params: &TaskSendParams) -> AgentResult<Task>;

    /// Retrieves a task by id. Returns `None` when the id is unknown.
    async fn get_task(&self, task_id: &str) -> AgentResult<Option<Task>>;

    /// Overwrites a task's status and appends any supplied artifacts,
    /// returning the updated record.
    ///
    /// # Errors
    ///
    /// Fails with [`AgentError::TaskNotFound`](crate::errors::AgentError::TaskNotFound)
    /// when the id was never upserted; the store is left unchanged.
    async fn update_task(
        &self,
        task_id: &str,
        status: TaskStatus,
        artifacts: Option<Vec<Artifact>>,
    ) -> AgentResult<Task>;
}
