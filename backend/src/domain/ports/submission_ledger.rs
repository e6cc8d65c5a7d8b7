//! Port for the submission ledger.
//!
//! The ledger owns the at-most-one-submission-per-(user, task) invariant and
//! the user's running totals. `upsert` must perform the read-existing →
//! score → write-submission → adjust-totals sequence atomically; adapters
//! are expected to wrap it in a single database transaction.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::submission::{Submission, SubmissionDraft};
use crate::domain::task::{Task, TaskId};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by submission ledger adapters.
    pub enum SubmissionLedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } =>
            "submission ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "submission ledger query failed: {message}",
        /// The submitting user vanished mid-flight.
        UserMissing { message: String } =>
            "submitting user not found: {message}",
    }
}

impl From<SubmissionLedgerError> for crate::domain::Error {
    fn from(error: SubmissionLedgerError) -> Self {
        match error {
            SubmissionLedgerError::Connection { message } => {
                tracing::error!(%message, "submission ledger unavailable");
                Self::service_unavailable("service temporarily unavailable")
            }
            SubmissionLedgerError::Query { message } => {
                tracing::error!(%message, "submission ledger query failed");
                Self::internal("internal error")
            }
            SubmissionLedgerError::UserMissing { message } => Self::not_found(message),
        }
    }
}

/// Port for recording submissions and reading their projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionLedger: Send + Sync {
    /// Record or replace the submission for `(user_id, task.id)`.
    ///
    /// Scoring uses [`crate::domain::scoring`]: resubmission applies point
    /// and referral deltas to the user's totals, never the full new values,
    /// and the proof bonus latches on first files. Completing the task for
    /// the user's stored `current_day` advances that counter.
    async fn upsert(
        &self,
        user_id: &UserId,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Submission, SubmissionLedgerError>;

    /// All submissions by a user, day ascending, with files attached.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Submission>, SubmissionLedgerError>;

    /// The submission for one `(user, task)` pair, if any.
    async fn find_for_task(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Submission>, SubmissionLedgerError>;

    /// Task ids the user has completed; input to the eligibility engine.
    async fn completed_task_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<TaskId>, SubmissionLedgerError>;

    /// Number of submissions a user has made.
    async fn count_for_user(&self, user_id: &UserId) -> Result<i64, SubmissionLedgerError>;
}
