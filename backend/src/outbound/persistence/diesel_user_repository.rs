//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Persists accounts and serves the ranking reads; duplicate-email inserts
//! are detected at the unique constraint and surfaced as a dedicated port
//! error so the service layer can answer with a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{AccountStatus, EmailAddress, NewUser, User, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain().map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: NewUser,
        registered_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            email: user.email.as_str(),
            password_hash: &user.password_hash,
            name: &user.name,
            college: &user.college,
            group_leader: &user.group_leader,
            role: user.role.as_str(),
            current_day: 0,
            total_points: 0,
            total_referrals: 0,
            registered_at,
            is_active: true,
            status: AccountStatus::Active.as_str(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_user(row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        name: Option<String>,
        college: Option<String>,
        group_leader: Option<String>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserProfileChangeset {
            name,
            college,
            group_leader,
        };

        let row: UserRow = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                diesel::result::Error::NotFound => {
                    UserPersistenceError::not_found(id.to_string())
                }
                other => map_diesel_error(other),
            })?;

        row_to_user(row)
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(UserPersistenceError::not_found(id.to_string()));
        }
        Ok(())
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(users::last_login_at.eq(Some(at)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_status(
        &self,
        id: &UserId,
        status: AccountStatus,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set((
                users::status.eq(status.as_str()),
                users::is_active.eq(status == AccountStatus::Active),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                diesel::result::Error::NotFound => {
                    UserPersistenceError::not_found(id.to_string())
                }
                other => map_diesel_error(other),
            })?;

        row_to_user(row)
    }

    async fn count_active_with_more_points(
        &self,
        points: i32,
    ) -> Result<i64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::is_active.eq(true).and(users::total_points.gt(points)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::is_active.eq(true))
            .order((users::total_points.desc(), users::total_referrals.desc()))
            .limit(limit)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::registered_at.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "amber@example.edu".into(),
            password_hash: "digest".into(),
            name: "Amber".into(),
            college: "Hill College".into(),
            group_leader: String::new(),
            role: "ambassador".into(),
            current_day: 3,
            total_points: 120,
            total_referrals: 4,
            registered_at: Utc::now(),
            last_login_at: None,
            is_active: true,
            status: "active".into(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(mapped, UserPersistenceError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn valid_row_converts_to_domain_user(valid_row: UserRow) {
        let user = row_to_user(valid_row).expect("row should convert");
        assert_eq!(user.email.as_str(), "amber@example.edu");
        assert_eq!(user.status, AccountStatus::Active);
    }

    #[rstest]
    fn corrupt_email_surfaces_as_query_error(mut valid_row: UserRow) {
        valid_row.email = "not-an-email".into();
        let err = row_to_user(valid_row).expect_err("row should be rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn unknown_status_surfaces_as_query_error(mut valid_row: UserRow) {
        valid_row.status = "banned".into();
        let err = row_to_user(valid_row).expect_err("row should be rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
