use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Task status. Writes with any value outside this set are rejected at the
/// service boundary with a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Deferred,
    #[serde(rename = "Waiting on someone else")]
    WaitingOnSomeoneElse,
}

pub const ALLOWED_TASK_STATUSES: [&str; 5] = [
    "Not Started",
    "In Progress",
    "Completed",
    "Deferred",
    "Waiting on someone else",
];

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Deferred => "Deferred",
            TaskStatus::WaitingOnSomeoneElse => "Waiting on someone else",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Not Started" => Some(TaskStatus::NotStarted),
            "In Progress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            "Deferred" => Some(TaskStatus::Deferred),
            "Waiting on someone else" => Some(TaskStatus::WaitingOnSomeoneElse),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Deferred
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskRepeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_name: String,
    pub subject: String,
    pub due_date: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub repeat: TaskRepeat,
    #[serde(default)]
    pub description: String,
    /// Optional inline image (data URL), carried through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_all_allowed() {
        for s in ALLOWED_TASK_STATUSES {
            assert!(TaskStatus::parse(s).is_some(), "{} should parse", s);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!(TaskStatus::parse("Bogus").is_none());
        assert!(TaskStatus::parse("not started").is_none());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TaskStatus::WaitingOnSomeoneElse).unwrap();
        assert_eq!(json, "\"Waiting on someone else\"");
    }

    #[test]
    fn test_default_status_is_deferred() {
        assert_eq!(TaskStatus::default(), TaskStatus::Deferred);
    }
}
