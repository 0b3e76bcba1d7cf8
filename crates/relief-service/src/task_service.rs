//! Task service trait definition.

use crate::dto::{CreateTaskRequest, TaskCreated, TaskDetail, TaskSummary, TaskUpdated};
use async_trait::async_trait;
use relief_core::{Interface, ReliefResult, TaskChanges};

/// Task service trait.
#[async_trait]
pub trait TaskService: Interface + Send + Sync {
    /// Creates a pending task.
    async fn create_task(&self, request: CreateTaskRequest) -> ReliefResult<TaskCreated>;

    /// Lists every task.
    async fn list_tasks(&self) -> ReliefResult<Vec<TaskSummary>>;

    /// Gets a task by id.
    async fn get_task(&self, id: &str) -> ReliefResult<TaskDetail>;

    /// Sets status, notes or attachments of a task.
    async fn update_task(&self, id: &str, changes: TaskChanges) -> ReliefResult<TaskUpdated>;
}
