use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use a2a_protocol::{Artifact, Task, TaskSendParams, TaskState, TaskStatus};

use crate::errors::{AgentError, AgentResult};

use super::task_store::TaskStore;

/// In-memory implementation of [`TaskStore`].
///
/// Backed by a `DashMap` keyed by task id, so updates to one task never block
/// updates to another. Records live for the lifetime of the process; suitable
/// for development and testing, not for durable deployments.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: DashMap<String, Task>,
}

impl InMemoryTaskStore {
    /// Creates a new empty in-memory task store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tasks currently stored.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are stored.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn upsert_task(&self, params: &TaskSendParams) -> AgentResult<Task> {
        match self.tasks.entry(params.id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().history.push(params.message.clone());
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                let task = Task {
                    id: params.id.clone(),
                    session_id: Some(params.session_id.clone()),
                    status: TaskStatus {
                        state: TaskState::Submitted,
                        message: None,
                        timestamp: Some(Utc::now().to_rfc3339()),
                    },
                    artifacts: Vec::new(),
                    history: vec![params.message.clone()],
                    metadata: params.metadata.clone(),
                };
                Ok(entry.insert(task).clone())
            }
        }
    }

    async fn get_task(&self, task_id: &str) -> AgentResult<Option<Task>> {
        Ok(self.tasks.get(task_id).map(|task| task.value().clone()))
    }

    async fn update_task(
        &self,
        task_id: &str,
        status: TaskStatus,
        artifacts: Option<Vec<Artifact>>,
    ) -> AgentResult<Task> {
        let mut entry = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| AgentError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;

        entry.status = status;
        if let Some(artifacts) = artifacts {
            entry.artifacts.extend(artifacts);
        }

        Ok(entry.value().clone())
    }
}
