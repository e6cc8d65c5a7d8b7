//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::task::{NewTask, Task, TaskChanges, TaskId, TaskKind};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    map_basic_pool_error(error, TaskPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    map_basic_diesel_error(
        error,
        TaskPersistenceError::query,
        TaskPersistenceError::connection,
    )
}

fn changes_to_changeset(changes: TaskChanges) -> TaskChangeset {
    TaskChangeset {
        day: changes.day,
        title: changes.title,
        description: changes.description,
        task_type: changes.task_type.map(|kind| kind.as_str().to_owned()),
        points_reward: changes.points_reward,
        is_active: changes.is_active,
        updated_at: Some(Utc::now()),
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTaskRow {
            id: Uuid::new_v4(),
            day: task.day,
            title: &task.title,
            description: &task.description,
            task_type: task.task_type.as_str(),
            points_reward: task.points_reward,
            is_active: task.is_active,
        };

        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TaskRow = diesel::update(tasks::table.filter(tasks::id.eq(id.as_uuid())))
            .set(&changes_to_changeset(changes))
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                diesel::result::Error::NotFound => {
                    TaskPersistenceError::not_found(id.to_string())
                }
                other => map_diesel_error(other),
            })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(TaskPersistenceError::not_found(id.to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = tasks::table
            .filter(tasks::id.eq(id.as_uuid()))
            .select(TaskRow::as_select())
            .first::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_day(&self, day: i32) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = tasks::table
            .filter(tasks::day.eq(day).and(tasks::is_active.eq(true)))
            .order(tasks::created_at.asc())
            .select(TaskRow::as_select())
            .first::<TaskRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_active(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::is_active.eq(true))
            .order(tasks::day.asc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::day.asc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        tasks::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
