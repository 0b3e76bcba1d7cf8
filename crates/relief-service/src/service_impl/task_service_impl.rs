//! Task service implementation.

use crate::dto::{CreateTaskRequest, TaskCreated, TaskDetail, TaskSummary, TaskUpdated};
use crate::task_service::TaskService;
use async_trait::async_trait;
use chrono::Utc;
use relief_core::{ReliefError, ReliefResult, Task, TaskChanges};
use relief_storage::DocumentCollection;
use std::sync::Arc;
use tracing::{debug, info};

/// Collection holding task documents.
pub const TASKS_COLLECTION: &str = "tasks";

/// Task service backed by a document collection.
pub struct TaskServiceImpl {
    tasks: Arc<dyn DocumentCollection>,
}

impl TaskServiceImpl {
    pub fn new(tasks: Arc<dyn DocumentCollection>) -> Self {
        Self { tasks }
    }

    async fn load(&self, id: &str) -> ReliefResult<Task> {
        self.tasks
            .read(id)
            .await?
            .ok_or_else(|| ReliefError::not_found("Task", id))?
            .parse()
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    async fn create_task(&self, request: CreateTaskRequest) -> ReliefResult<TaskCreated> {
        if request.request_id.is_empty() || request.assignee_id.is_empty() {
            return Err(ReliefError::validation("requestId and assigneeId are required"));
        }

        let task = Task::new(
            request.request_id,
            request.assignee_id,
            request.resource_allocations,
        );
        self.tasks
            .create(task.task_id.as_str(), serde_json::to_value(&task)?)
            .await?;

        info!(task_id = %task.task_id, request_id = %task.request_id, "Task created");
        Ok(TaskCreated {
            task_id: task.task_id,
            created_at: task.created_at,
        })
    }

    async fn list_tasks(&self) -> ReliefResult<Vec<TaskSummary>> {
        debug!("Listing tasks");

        self.tasks
            .list()
            .await?
            .iter()
            .map(|record| record.parse::<Task>().map(TaskSummary::from))
            .collect()
    }

    async fn get_task(&self, id: &str) -> ReliefResult<TaskDetail> {
        debug!(task_id = id, "Getting task");
        Ok(TaskDetail::from(self.load(id).await?))
    }

    async fn update_task(&self, id: &str, changes: TaskChanges) -> ReliefResult<TaskUpdated> {
        let mut task = self.load(id).await?;

        let now = Utc::now();
        task.apply(changes, now)?;

        self.tasks
            .update(id, serde_json::to_value(&task)?)
            .await?
            .ok_or_else(|| ReliefError::not_found("Task", id))?;

        info!(task_id = id, status = ?task.status, "Task updated");
        Ok(TaskUpdated {
            task_id: task.task_id,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_impl::test_support::collection;
    use relief_core::{ResourceAllocation, TaskStatus};

    async fn service() -> TaskServiceImpl {
        TaskServiceImpl::new(collection(TASKS_COLLECTION).await)
    }

    fn create_request() -> CreateTaskRequest {
        CreateTaskRequest {
            request_id: "req-1".to_string(),
            assignee_id: "responder-1".to_string(),
            resource_allocations: vec![ResourceAllocation {
                resource_id: "water".to_string(),
                quantity: 20.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let service = service().await;
        let created = service.create_task(create_request()).await.unwrap();

        let detail = service.get_task(created.task_id.as_str()).await.unwrap();
        assert_eq!(detail.request_id, "req-1");
        assert_eq!(detail.assigned_responder, "responder-1");
        assert_eq!(detail.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let service = service().await;
        service.create_task(create_request()).await.unwrap();
        let tasks = service.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].request_id, "req-1");
    }

    #[tokio::test]
    async fn test_update_status_and_notes() {
        let service = service().await;
        let created = service.create_task(create_request()).await.unwrap();
        let id = created.task_id.as_str();

        service
            .update_task(
                id,
                TaskChanges {
                    status: Some(TaskStatus::Completed),
                    notes: Some("Delivered".to_string()),
                    attachments: None,
                },
            )
            .await
            .unwrap();

        let detail = service.get_task(id).await.unwrap();
        assert_eq!(detail.status, TaskStatus::Completed);
        assert_eq!(detail.notes, "Delivered");
    }

    #[tokio::test]
    async fn test_get_missing_task() {
        let service = service().await;
        let err = service.get_task("task-missing").await.unwrap_err();
        assert!(matches!(err, ReliefError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_requires_ids() {
        let service = service().await;
        let mut request = create_request();
        request.assignee_id.clear();
        assert_eq!(
            service.create_task(request).await.unwrap_err().status_code(),
            400
        );
    }
}
