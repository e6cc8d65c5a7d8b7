//! PostgreSQL-backed `ReportingRepository` implementation using Diesel ORM.
//!
//! Aggregate reads only; every query is a projection over the users and
//! submissions tables with no writes.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CollegePoints, ReportingError, ReportingRepository, SubmissionCounts, UserCounts};
use crate::domain::user::{AccountStatus, Role};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{submissions, users};

/// Diesel-backed implementation of the reporting repository port.
#[derive(Clone)]
pub struct DieselReportingRepository {
    pool: DbPool,
}

impl DieselReportingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReportingError {
    map_basic_pool_error(error, ReportingError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReportingError {
    map_basic_diesel_error(error, ReportingError::query, ReportingError::connection)
}

#[async_trait]
impl ReportingRepository for DieselReportingRepository {
    async fn user_counts(&self) -> Result<UserCounts, ReportingError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, String)> = users::table
            .select((users::role, users::status))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut counts = UserCounts::default();
        for (role, status) in rows {
            match Role::from_str_lossy(&role) {
                Role::Admin => counts.admins += 1,
                Role::Ambassador => counts.ambassadors += 1,
            }
            match AccountStatus::parse(&status) {
                Some(AccountStatus::Active) | None => counts.active += 1,
                Some(AccountStatus::Inactive) => counts.inactive += 1,
                Some(AccountStatus::Suspended) => counts.suspended += 1,
            }
        }
        Ok(counts)
    }

    async fn submission_counts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<SubmissionCounts, ReportingError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = submissions::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let last_day: i64 = submissions::table
            .filter(submissions::updated_at.ge(now - Duration::hours(24)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let last_week: i64 = submissions::table
            .filter(submissions::updated_at.ge(now - Duration::days(7)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(SubmissionCounts {
            total,
            last_day,
            last_week,
        })
    }

    async fn college_points(&self) -> Result<Vec<CollegePoints>, ReportingError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, Option<i64>)> = users::table
            .filter(users::is_active.eq(true))
            .group_by(users::college)
            .select((users::college, sum(users::total_points)))
            .order(sum(users::total_points).desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(college, total_points)| CollegePoints {
                college,
                total_points: total_points.unwrap_or_default(),
            })
            .collect())
    }

    async fn active_point_totals(&self) -> Result<Vec<i32>, ReportingError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::is_active.eq(true))
            .select(users::total_points)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
