//! Administrative reporting and user management service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    AdminService, AdminUserSummary, Clock, PerformanceBuckets, ProgramAnalytics,
    ReportingRepository, SubmissionLedger, UserRepository,
};
use crate::domain::submission::Submission;
use crate::domain::user::{AccountStatus, User, UserId};

/// Admin service implementing the [`AdminService`] driving port.
#[derive(Clone)]
pub struct AdminServiceImpl<U, L, R, C> {
    users: Arc<U>,
    ledger: Arc<L>,
    reporting: Arc<R>,
    clock: Arc<C>,
}

impl<U, L, R, C> AdminServiceImpl<U, L, R, C> {
    /// Create the service over its collaborating ports.
    pub fn new(users: Arc<U>, ledger: Arc<L>, reporting: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            users,
            ledger,
            reporting,
            clock,
        }
    }
}

fn summarise(user: User) -> AdminUserSummary {
    AdminUserSummary {
        id: user.id,
        email: user.email.to_string(),
        name: user.name,
        college: user.college,
        group_leader: (!user.group_leader.is_empty()).then_some(user.group_leader),
        role: user.role.as_str().to_owned(),
        total_points: user.total_points,
        total_referrals: user.total_referrals,
        status: user.status,
        registered_at: user.registered_at,
        last_login_at: user.last_login_at,
    }
}

/// Bucket active ambassadors by accumulated points.
fn bucket_points(totals: &[i32]) -> PerformanceBuckets {
    let mut buckets = PerformanceBuckets::default();
    for &points in totals {
        if points >= 500 {
            buckets.leading += 1;
        } else if points >= 100 {
            buckets.growing += 1;
        } else {
            buckets.starting += 1;
        }
    }
    buckets
}

#[async_trait]
impl<U, L, R, C> AdminService for AdminServiceImpl<U, L, R, C>
where
    U: UserRepository,
    L: SubmissionLedger,
    R: ReportingRepository,
    C: Clock,
{
    async fn analytics(&self) -> Result<ProgramAnalytics, Error> {
        let users = self.reporting.user_counts().await?;
        let submissions = self.reporting.submission_counts(self.clock.now()).await?;
        let colleges = self.reporting.college_points().await?;
        let totals = self.reporting.active_point_totals().await?;

        Ok(ProgramAnalytics {
            users,
            submissions,
            colleges,
            performance: bucket_points(&totals),
        })
    }

    async fn list_users(&self) -> Result<Vec<AdminUserSummary>, Error> {
        let mut all = self.users.list_all().await?;
        all.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        Ok(all.into_iter().map(summarise).collect())
    }

    async fn set_user_status(
        &self,
        user_id: UserId,
        status: AccountStatus,
    ) -> Result<AdminUserSummary, Error> {
        let updated = self.users.set_status(&user_id, status).await?;
        tracing::info!(user_id = %user_id, status = status.as_str(), "changed account status");
        Ok(summarise(updated))
    }

    async fn user_submissions(&self, user_id: UserId) -> Result<Vec<Submission>, Error> {
        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        Ok(self.ledger.list_for_user(&user_id).await?)
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
