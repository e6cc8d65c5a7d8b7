//! Port for task catalog persistence.

use async_trait::async_trait;

use crate::domain::task::{NewTask, Task, TaskChanges, TaskId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "task repository query failed: {message}",
        /// The addressed task does not exist.
        NotFound { message: String } =>
            "task not found: {message}",
    }
}

impl From<TaskPersistenceError> for crate::domain::Error {
    fn from(error: TaskPersistenceError) -> Self {
        match error {
            TaskPersistenceError::Connection { message } => {
                tracing::error!(%message, "task repository unavailable");
                Self::service_unavailable("service temporarily unavailable")
            }
            TaskPersistenceError::Query { message } => {
                tracing::error!(%message, "task repository query failed");
                Self::internal("internal error")
            }
            TaskPersistenceError::NotFound { message } => Self::not_found(message),
        }
    }
}

/// Port for catalog reads and admin mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a catalog entry.
    async fn insert(&self, task: NewTask) -> Result<Task, TaskPersistenceError>;

    /// Apply a partial update and return the updated entry.
    async fn update(&self, id: &TaskId, changes: TaskChanges) -> Result<Task, TaskPersistenceError>;

    /// Delete a catalog entry and its submissions' files cascade.
    async fn delete(&self, id: &TaskId) -> Result<(), TaskPersistenceError>;

    /// Find an entry by identifier.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// First active entry for the given day, if any.
    async fn find_by_day(&self, day: i32) -> Result<Option<Task>, TaskPersistenceError>;

    /// Active entries, day ascending.
    async fn list_active(&self) -> Result<Vec<Task>, TaskPersistenceError>;

    /// All entries including inactive ones, day ascending.
    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Total number of entries, used by bootstrap seeding.
    async fn count(&self) -> Result<i64, TaskPersistenceError>;
}
