//! Leaderboard and dashboard read-side service.
//!
//! Rankings follow two deliberate rules: the positional rank on the public
//! leaderboard is the row's position in the `(points desc, referrals desc)`
//! ordering, while `rank_position` on profiles and dashboards is the strict
//! count `1 + |active users with strictly more points|`. Ties therefore
//! share a `rank_position` but occupy distinct leaderboard rows.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    DashboardStats, LeaderboardEntry, LeaderboardQuery, SubmissionLedger, TaskRepository,
    UserRepository,
};
use crate::domain::user::User;

/// Leaderboard service implementing the [`LeaderboardQuery`] driving port.
#[derive(Clone)]
pub struct LeaderboardQueryImpl<U, T, L> {
    users: Arc<U>,
    tasks: Arc<T>,
    ledger: Arc<L>,
}

impl<U, T, L> LeaderboardQueryImpl<U, T, L> {
    /// Create the service over its collaborating ports.
    pub fn new(users: Arc<U>, tasks: Arc<T>, ledger: Arc<L>) -> Self {
        Self {
            users,
            tasks,
            ledger,
        }
    }
}

/// Share of unlocked tasks completed, rounded to one decimal place.
fn completion_percentage(completed: i64, current_day: i32) -> f64 {
    let unlocked = i64::from(current_day.saturating_add(1)).max(1);
    #[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
    let ratio = completed as f64 / unlocked as f64;
    (ratio * 1000.0).round() / 10.0
}

#[async_trait]
impl<U, T, L> LeaderboardQuery for LeaderboardQueryImpl<U, T, L>
where
    U: UserRepository,
    T: TaskRepository,
    L: SubmissionLedger,
{
    async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, Error> {
        let top = self.users.leaderboard(limit.max(0)).await?;
        Ok(top
            .into_iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                name: user.name,
                college: user.college,
                total_points: user.total_points,
                total_referrals: user.total_referrals,
                rank: i64::try_from(index + 1).unwrap_or(i64::MAX),
            })
            .collect())
    }

    async fn dashboard_stats(&self, user: &User) -> Result<DashboardStats, Error> {
        // Reload so totals reflect submissions recorded after the token
        // was authenticated.
        let user = self
            .users
            .find_by_id(&user.id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let total_tasks_completed = self.ledger.count_for_user(&user.id).await?;
        let ahead = self
            .users
            .count_active_with_more_points(user.total_points)
            .await?;
        let next_task = self.tasks.find_by_day(user.current_day).await?;

        Ok(DashboardStats {
            current_day: user.current_day,
            total_tasks_completed,
            total_points: user.total_points,
            total_referrals: user.total_referrals,
            rank_position: ahead + 1,
            completion_percentage: completion_percentage(total_tasks_completed, user.current_day),
            next_task: next_task.map(|task| task.title),
            user_name: user.name,
            college: user.college,
        })
    }
}

#[cfg(test)]
#[path = "leaderboard_service_tests.rs"]
mod tests;
