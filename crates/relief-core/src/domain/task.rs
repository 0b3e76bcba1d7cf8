//! Tasks assigned to responders for a help request.

use super::Attachment;
use crate::{ReliefError, ReliefResult, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A quantity of some resource reserved for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAllocation {
    pub resource_id: String,
    pub quantity: f64,
}

/// A task document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: TaskId,
    pub request_id: String,
    pub assignee_id: String,
    #[serde(default)]
    pub resource_allocations: Vec<ResourceAllocation>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

impl TaskChanges {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none() && self.attachments.is_none()
    }
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(
        request_id: String,
        assignee_id: String,
        resource_allocations: Vec<ResourceAllocation>,
    ) -> Self {
        Self {
            task_id: TaskId::new(),
            request_id,
            assignee_id,
            resource_allocations,
            status: TaskStatus::Pending,
            notes: String::new(),
            attachments: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Applies a partial update. Attachments are replaced, not appended.
    pub fn apply(&mut self, changes: TaskChanges, now: DateTime<Utc>) -> ReliefResult<()> {
        if changes.is_empty() {
            return Err(ReliefError::validation(
                "one of status, notes or attachments is required",
            ));
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        if let Some(attachments) = changes.attachments {
            self.attachments = attachments;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("req-1".to_string(), "user-9".to_string(), Vec::new());
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.notes.is_empty());
        assert!(task.task_id.has_prefix());
    }

    #[test]
    fn test_apply_changes() {
        let mut task = Task::new("req-1".to_string(), "user-9".to_string(), Vec::new());
        let changes = TaskChanges {
            status: Some(TaskStatus::InProgress),
            notes: Some("On the way".to_string()),
            attachments: None,
        };
        task.apply(changes, Utc::now()).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.notes, "On the way");
        assert!(task.updated_at.is_some());
    }

    #[test]
    fn test_apply_empty_changes_rejected() {
        let mut task = Task::new("req-1".to_string(), "user-9".to_string(), Vec::new());
        assert!(task.apply(TaskChanges::default(), Utc::now()).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
