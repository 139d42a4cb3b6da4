use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::instrument;

use crate::dto::task_dto::{CreateTaskRequest, TaskPatch};
use crate::model::task::{Task, TaskStatus, ALLOWED_TASK_STATUSES};
use crate::repository::task_repo::{MongoTaskRepository, TaskRepository};
use crate::util::error::ServiceError;

/// Maps a raw status string to the enum, rejecting anything outside the
/// allowed set with the full list in the error message.
pub fn parse_task_status(raw: &str) -> Result<TaskStatus, ServiceError> {
    TaskStatus::parse(raw).ok_or_else(|| {
        ServiceError::InvalidInput(format!(
            "Invalid status value. Allowed values are: {}.",
            ALLOWED_TASK_STATUSES.join(", ")
        ))
    })
}

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create(&self, request: CreateTaskRequest) -> Result<Task, ServiceError>;
    async fn list(&self) -> Result<Vec<Task>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Task, ServiceError>;
    async fn update(&self, id: ObjectId, patch: TaskPatch) -> Result<Task, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct TaskServiceImpl {
    pub task_repo: MongoTaskRepository,
}

impl TaskServiceImpl {
    pub fn new(task_repo: MongoTaskRepository) -> Self {
        Self { task_repo }
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    #[instrument(skip(self, request), fields(subject = %request.subject))]
    async fn create(&self, request: CreateTaskRequest) -> Result<Task, ServiceError> {
        let status = match request.status.as_deref() {
            Some(raw) => parse_task_status(raw)?,
            None => TaskStatus::default(),
        };

        let task = Task {
            id: None,
            owner_name: request.owner_name,
            subject: request.subject,
            due_date: request.due_date,
            contact: request.contact.unwrap_or_default(),
            account: request.account.unwrap_or_default(),
            status,
            priority: request.priority.unwrap_or_default(),
            reminder: request.reminder.unwrap_or(false),
            repeat: request.repeat.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            image: request.image,
            created_at: None,
            updated_at: None,
        };

        Ok(self.task_repo.insert(task).await?)
    }

    async fn list(&self) -> Result<Vec<Task>, ServiceError> {
        Ok(self.task_repo.find_all().await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Task, ServiceError> {
        self.task_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: ObjectId, patch: TaskPatch) -> Result<Task, ServiceError> {
        // Status is validated before touching the stored document, so a
        // bogus value leaves the task unchanged.
        let status = match patch.status.as_deref() {
            Some(raw) => Some(parse_task_status(raw)?),
            None => None,
        };

        let mut task = self
            .task_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

        patch.apply(&mut task);
        if let Some(status) = status {
            task.status = status;
        }

        Ok(self.task_repo.update(id, task).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        Ok(self.task_repo.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_status_accepts_allowed_values() {
        assert_eq!(
            parse_task_status("In Progress").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(parse_task_status("Deferred").unwrap(), TaskStatus::Deferred);
    }

    #[test]
    fn test_parse_task_status_rejects_bogus_value() {
        let err = parse_task_status("Bogus").unwrap_err();
        match err {
            ServiceError::InvalidInput(msg) => {
                assert!(msg.contains("Invalid status value"));
                assert!(msg.contains("Waiting on someone else"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
