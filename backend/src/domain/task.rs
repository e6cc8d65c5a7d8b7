//! Task catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Day-0 onboarding task, always visible.
    Orientation,
    /// Regular day-indexed promotion task.
    #[serde(rename = "daily_task")]
    Daily,
}

impl TaskKind {
    /// Stable string form used in persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orientation => "orientation",
            Self::Daily => "daily_task",
        }
    }

    /// Parse the persisted string form; unknown values are treated as
    /// daily tasks.
    #[must_use]
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "orientation" => Self::Orientation,
            _ => Self::Daily,
        }
    }
}

/// A day-indexed catalog entry ambassadors submit against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Programme day this task belongs to; `0` is orientation.
    pub day: i32,
    /// Short title shown in listings.
    pub title: String,
    /// Full description of the required activity.
    pub description: String,
    /// Category of the entry.
    pub task_type: TaskKind,
    /// Base points awarded on submission.
    pub points_reward: i32,
    /// Inactive tasks are hidden from ambassadors.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a catalog entry.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Programme day; must be `>= 0`.
    pub day: i32,
    /// Short title shown in listings.
    pub title: String,
    /// Full description of the required activity.
    pub description: String,
    /// Category of the entry.
    pub task_type: TaskKind,
    /// Base points awarded on submission.
    pub points_reward: i32,
    /// Whether the task is visible to ambassadors.
    pub is_active: bool,
}

/// Partial update applied to an existing catalog entry.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    /// New day index, when changed.
    pub day: Option<i32>,
    /// New title, when changed.
    pub title: Option<String>,
    /// New description, when changed.
    pub description: Option<String>,
    /// New category, when changed.
    pub task_type: Option<TaskKind>,
    /// New base reward, when changed.
    pub points_reward: Option<i32>,
    /// New visibility, when changed.
    pub is_active: Option<bool>,
}

impl TaskChanges {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.day.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.task_type.is_none()
            && self.points_reward.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn task_kind_serialises_to_original_wire_names() {
        assert_eq!(
            serde_json::to_value(TaskKind::Daily).expect("serialise"),
            serde_json::json!("daily_task")
        );
        assert_eq!(
            serde_json::to_value(TaskKind::Orientation).expect("serialise"),
            serde_json::json!("orientation")
        );
    }

    #[test]
    fn empty_changes_detected() {
        assert!(TaskChanges::default().is_empty());
        let changes = TaskChanges {
            title: Some("new".to_owned()),
            ..TaskChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
