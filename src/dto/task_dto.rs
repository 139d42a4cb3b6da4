use serde::Deserialize;
use validator::Validate;

use crate::model::task::{Task, TaskPriority, TaskRepeat};

/// Create payload. `status` arrives as a plain string so the service can
/// reject unknown values with a 400 listing the allowed set, instead of an
/// opaque deserialization failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub owner_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 256))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub due_date: String,
    pub contact: Option<String>,
    pub account: Option<String>,
    pub status: Option<String>,
    pub priority: Option<TaskPriority>,
    pub reminder: Option<bool>,
    pub repeat: Option<TaskRepeat>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub owner_name: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub contact: Option<String>,
    pub account: Option<String>,
    pub status: Option<String>,
    pub priority: Option<TaskPriority>,
    pub reminder: Option<bool>,
    pub repeat: Option<TaskRepeat>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl TaskPatch {
    /// Applies everything except `status`, which the service validates and
    /// applies separately.
    pub fn apply(self, task: &mut Task) {
        if let Some(v) = self.owner_name {
            task.owner_name = v;
        }
        if let Some(v) = self.subject {
            task.subject = v;
        }
        if let Some(v) = self.due_date {
            task.due_date = v;
        }
        if let Some(v) = self.contact {
            task.contact = v;
        }
        if let Some(v) = self.account {
            task.account = v;
        }
        if let Some(v) = self.priority {
            task.priority = v;
        }
        if let Some(v) = self.reminder {
            task.reminder = v;
        }
        if let Some(v) = self.repeat {
            task.repeat = v;
        }
        if let Some(v) = self.description {
            task.description = v;
        }
        if let Some(v) = self.image {
            task.image = Some(v);
        }
    }
}
