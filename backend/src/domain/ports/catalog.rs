//! Driving port for task catalog reads and admin mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::eligibility::EligibleTask;
use crate::domain::task::{Task, TaskId, TaskKind};
use crate::domain::user::User;

/// Admin payload creating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Programme day; must be `>= 0`.
    pub day: i32,
    /// Short title shown in listings.
    pub title: String,
    /// Full description of the required activity.
    pub description: String,
    /// Category; defaults to a daily task (orientation for day 0).
    #[serde(default)]
    pub task_type: Option<TaskKind>,
    /// Base points awarded on submission; defaults to 50.
    #[serde(default)]
    pub points_reward: Option<i32>,
    /// Whether the task is visible; defaults to true.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Admin payload updating a catalog entry; absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    /// New day index.
    #[serde(default)]
    pub day: Option<i32>,
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New category.
    #[serde(default)]
    pub task_type: Option<TaskKind>,
    /// New base reward.
    #[serde(default)]
    pub points_reward: Option<i32>,
    /// New visibility.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Driving port for the task catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCatalogService: Send + Sync {
    /// Active catalog annotated with availability for the given user.
    async fn tasks_for_user(&self, user: &User) -> Result<Vec<EligibleTask>, Error>;

    /// Full active catalog, day ascending.
    async fn all_tasks(&self) -> Result<Vec<Task>, Error>;

    /// Full catalog including inactive entries, for admins.
    async fn admin_tasks(&self) -> Result<Vec<Task>, Error>;

    /// Create a catalog entry.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, Error>;

    /// Update a catalog entry.
    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> Result<Task, Error>;

    /// Delete a catalog entry.
    async fn delete_task(&self, id: TaskId) -> Result<(), Error>;

    /// Seed the default programme when the catalog is empty.
    ///
    /// Returns the number of tasks created (zero when already seeded).
    async fn seed_default_catalog(&self) -> Result<usize, Error>;
}
