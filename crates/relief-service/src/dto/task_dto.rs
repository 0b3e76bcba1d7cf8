//! Task DTOs.

use chrono::{DateTime, Utc};
use relief_core::{Attachment, ResourceAllocation, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Request to create a task for a help request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub request_id: String,
    pub assignee_id: String,
    #[serde(default)]
    pub resource_allocations: Vec<ResourceAllocation>,
}

/// Acknowledgement of a created task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreated {
    pub task_id: TaskId,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement of a task update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdated {
    pub task_id: TaskId,
    pub updated_at: DateTime<Utc>,
}

/// List entry for a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub task_id: TaskId,
    pub request_id: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.task_id,
            request_id: task.request_id,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

/// Full task view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub task_id: TaskId,
    pub request_id: String,
    pub status: TaskStatus,
    pub notes: String,
    pub attachments: Vec<Attachment>,
    pub assigned_responder: String,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskDetail {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.task_id,
            request_id: task.request_id,
            status: task.status,
            notes: task.notes,
            attachments: task.attachments,
            assigned_responder: task.assignee_id,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_exposes_assignee_as_assigned_responder() {
        let task = Task::new("req-1".to_string(), "user-7".to_string(), Vec::new());
        let json = serde_json::to_value(TaskDetail::from(task)).unwrap();
        assert_eq!(json["assignedResponder"], "user-7");
        assert!(json.get("assigneeId").is_none());
    }
}
