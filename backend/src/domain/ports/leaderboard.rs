//! Driving port for the leaderboard and dashboard views.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::user::User;

/// One row of the public leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    /// Display name.
    pub name: String,
    /// College affiliation.
    pub college: String,
    /// Accumulated points.
    pub total_points: i32,
    /// Accumulated referrals.
    pub total_referrals: i32,
    /// Position in the returned ordering, starting at 1.
    pub rank: i64,
}

/// Aggregated dashboard figures for one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    /// Day of the programme the user has reached.
    pub current_day: i32,
    /// Number of completed submissions.
    pub total_tasks_completed: i64,
    /// Accumulated points.
    pub total_points: i32,
    /// Accumulated referrals.
    pub total_referrals: i32,
    /// Competitive rank among active users.
    pub rank_position: i64,
    /// Share of unlocked tasks completed, as a percentage.
    pub completion_percentage: f64,
    /// Title of the task for the user's current day, when one exists.
    pub next_task: Option<String>,
    /// Display name.
    pub user_name: String,
    /// College affiliation.
    pub college: String,
}

/// Driving port for leaderboard and dashboard reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// Top users ordered by points then referrals, capped at `limit`.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, Error>;

    /// Dashboard figures for the given user.
    async fn dashboard_stats(&self, user: &User) -> Result<DashboardStats, Error>;
}
