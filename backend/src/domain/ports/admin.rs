//! Driving port for administrative reporting and user management.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::reporting_repository::{CollegePoints, SubmissionCounts, UserCounts};
use crate::domain::submission::Submission;
use crate::domain::user::{AccountStatus, UserId};

/// One user as shown in the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminUserSummary {
    /// User identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// College affiliation.
    pub college: String,
    /// Group leader, when recorded.
    pub group_leader: Option<String>,
    /// Role name.
    pub role: String,
    /// Accumulated points.
    pub total_points: i32,
    /// Accumulated referrals.
    pub total_referrals: i32,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Most recent login, when one has occurred.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Distribution of active ambassadors across point bands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PerformanceBuckets {
    /// Fewer than 100 points.
    pub starting: i64,
    /// 100 to 499 points.
    pub growing: i64,
    /// 500 points or more.
    pub leading: i64,
}

/// Programme-wide analytics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgramAnalytics {
    /// User population broken down by role and status.
    pub users: UserCounts,
    /// Submission volume over recent windows.
    pub submissions: SubmissionCounts,
    /// Points aggregated per college, descending.
    pub colleges: Vec<CollegePoints>,
    /// Active ambassadors grouped by point band.
    pub performance: PerformanceBuckets,
}

/// Driving port for admin operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Programme-wide analytics snapshot.
    async fn analytics(&self) -> Result<ProgramAnalytics, Error>;

    /// Every registered user, newest first.
    async fn list_users(&self) -> Result<Vec<AdminUserSummary>, Error>;

    /// Change a user's lifecycle status.
    async fn set_user_status(
        &self,
        user_id: UserId,
        status: AccountStatus,
    ) -> Result<AdminUserSummary, Error>;

    /// Submissions recorded for the given user, day ascending.
    async fn user_submissions(&self, user_id: UserId) -> Result<Vec<Submission>, Error>;
}
