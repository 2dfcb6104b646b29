use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Remote status reported for a task at fetch time.
///
/// Unknown values are kept verbatim in [`TaskStatus::Other`] so that protocol
/// drift never fails decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Finished,
    NotStarted,
    Started,
    ReadyForClaim,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Finished => "FINISHED",
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::Started => "STARTED",
            TaskStatus::ReadyForClaim => "READY_FOR_CLAIM",
            TaskStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "FINISHED" => TaskStatus::Finished,
            "NOT_STARTED" => TaskStatus::NotStarted,
            "STARTED" => TaskStatus::Started,
            "READY_FOR_CLAIM" => TaskStatus::ReadyForClaim,
            other => TaskStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        TaskStatus::from(raw.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, rename = "isDisclaimerRequired")]
    pub disclaimer_required: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_tasks: Vec<TaskNode>,
}

/// A titled section of the catalog.
///
/// The service nests tasks two ways: through `subTasks` on a task, and
/// through `subSections` on a grouping. Both decode into this shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<TaskNode>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_sections: Vec<Grouping>,
}

/// Top-level groupings returned by one catalog fetch.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    pub groupings: Vec<Grouping>,
}

impl Catalog {
    pub fn new(groupings: Vec<Grouping>) -> Self {
        Self { groupings }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_task_with_null_sub_tasks_and_unknown_status() {
        let raw = r#"{"id":"t1","title":"Follow","status":"LOCKED","subTasks":null}"#;
        let task: TaskNode = serde_json::from_str(raw).expect("decode");
        assert_eq!(task.status, TaskStatus::Other("LOCKED".to_string()));
        assert!(task.sub_tasks.is_empty());
        assert!(!task.disclaimer_required);
    }

    #[test]
    fn decodes_grouping_with_missing_lists() {
        let raw = r#"{"title":"Empty"}"#;
        let grouping: Grouping = serde_json::from_str(raw).expect("decode");
        assert!(grouping.tasks.is_empty());
        assert!(grouping.sub_sections.is_empty());
    }

    #[test]
    fn status_serializes_back_to_raw_string() {
        let value = serde_json::to_value(TaskStatus::ReadyForClaim).expect("encode");
        assert_eq!(value, serde_json::json!("READY_FOR_CLAIM"));
        let value = serde_json::to_value(TaskStatus::from("NEW_THING")).expect("encode");
        assert_eq!(value, serde_json::json!("NEW_THING"));
    }
}
