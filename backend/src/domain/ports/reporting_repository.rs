//! Port for admin reporting aggregations.
//!
//! Pure read-side projections over users and submissions; no independent
//! state, no staleness guarantee beyond "current at query time".

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::define_port_error;

define_port_error! {
    /// Errors raised by reporting adapters.
    pub enum ReportingError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "reporting repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "reporting query failed: {message}",
    }
}

impl From<ReportingError> for crate::domain::Error {
    fn from(error: ReportingError) -> Self {
        match error {
            ReportingError::Connection { message } => {
                tracing::error!(%message, "reporting repository unavailable");
                Self::service_unavailable("service temporarily unavailable")
            }
            ReportingError::Query { message } => {
                tracing::error!(%message, "reporting query failed");
                Self::internal("internal error")
            }
        }
    }
}

/// Account counts grouped by role and status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserCounts {
    /// Accounts with the ambassador role.
    pub ambassadors: i64,
    /// Accounts with the admin role.
    pub admins: i64,
    /// Accounts with status `active`.
    pub active: i64,
    /// Accounts with status `inactive`.
    pub inactive: i64,
    /// Accounts with status `suspended`.
    pub suspended: i64,
}

/// Submission volume counts over fixed windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionCounts {
    /// All submissions ever recorded.
    pub total: i64,
    /// Submissions updated in the last 24 hours.
    pub last_day: i64,
    /// Submissions updated in the last 7 days.
    pub last_week: i64,
}

/// Point sum for one college across its active ambassadors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CollegePoints {
    /// College name as registered.
    pub college: String,
    /// Sum of `total_points` over the college's active users.
    pub total_points: i64,
}

/// Port for aggregate reads feeding admin dashboards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// Account counts by role and status.
    async fn user_counts(&self) -> Result<UserCounts, ReportingError>;

    /// Submission counts over windows anchored at `now`.
    async fn submission_counts(&self, now: DateTime<Utc>)
    -> Result<SubmissionCounts, ReportingError>;

    /// Point sums grouped by college, descending.
    async fn college_points(&self) -> Result<Vec<CollegePoints>, ReportingError>;

    /// `total_points` of every active user, for performance bucketing.
    async fn active_point_totals(&self) -> Result<Vec<i32>, ReportingError>;
}
