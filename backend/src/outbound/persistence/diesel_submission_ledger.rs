//! PostgreSQL-backed `SubmissionLedger` implementation using Diesel ORM.
//!
//! `upsert` runs as a single transaction: it locks the submitting user row,
//! reads any existing submission for the `(user, task)` pair, scores the
//! draft, writes the submission and its proof files, and adjusts the user's
//! running totals by the delta against the replaced submission. Concurrent
//! resubmissions therefore serialise on the user row and the totals never
//! double-count.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SubmissionLedger, SubmissionLedgerError};
use crate::domain::scoring;
use crate::domain::submission::{Submission, SubmissionDraft};
use crate::domain::task::{Task, TaskId};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    NewSubmissionFileRow, NewSubmissionRow, SubmissionFileRow, SubmissionResubmit, SubmissionRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{submission_files, submissions, users};

/// Diesel-backed implementation of the submission ledger port.
#[derive(Clone)]
pub struct DieselSubmissionLedger {
    pool: DbPool,
}

impl DieselSubmissionLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubmissionLedgerError {
    map_basic_pool_error(error, SubmissionLedgerError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SubmissionLedgerError {
    map_basic_diesel_error(
        error,
        SubmissionLedgerError::query,
        SubmissionLedgerError::connection,
    )
}

/// Transaction-internal error carrying the user-missing case past the
/// `From<diesel::result::Error>` bound on [`AsyncConnection::transaction`].
enum TxError {
    Diesel(diesel::result::Error),
    UserMissing(String),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<TxError> for SubmissionLedgerError {
    fn from(error: TxError) -> Self {
        match error {
            TxError::Diesel(err) => map_diesel_error(err),
            TxError::UserMissing(message) => Self::user_missing(message),
        }
    }
}

async fn load_files(
    conn: &mut AsyncPgConnection,
    submission_ids: &[Uuid],
) -> Result<Vec<SubmissionFileRow>, diesel::result::Error> {
    submission_files::table
        .filter(submission_files::submission_id.eq_any(submission_ids))
        .order(submission_files::uploaded_at.asc())
        .select(SubmissionFileRow::as_select())
        .load(conn)
        .await
}

/// Attach file rows to their submissions, preserving submission order.
fn assemble(rows: Vec<SubmissionRow>, mut files: Vec<SubmissionFileRow>) -> Vec<Submission> {
    rows.into_iter()
        .map(|row| {
            let (own, rest): (Vec<_>, Vec<_>) = files
                .drain(..)
                .partition(|file| file.submission_id == row.id);
            files = rest;
            row.into_domain(own)
        })
        .collect()
}

#[async_trait]
impl SubmissionLedger for DieselSubmissionLedger {
    async fn upsert(
        &self,
        user_id: &UserId,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Submission, SubmissionLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *user_id.as_uuid();
        let task_uuid = *task.id.as_uuid();
        let task_day = task.day;
        let points_reward = task.points_reward;

        let submission = conn
            .transaction::<Submission, TxError, _>(|conn| {
                async move {
                    // Lock the user row so concurrent resubmissions serialise
                    // and the totals adjustment stays consistent.
                    let current_day: i32 = users::table
                        .filter(users::id.eq(user_uuid))
                        .select(users::current_day)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| TxError::UserMissing(user_uuid.to_string()))?;

                    let existing: Option<SubmissionRow> = submissions::table
                        .filter(
                            submissions::user_id
                                .eq(user_uuid)
                                .and(submissions::task_id.eq(task_uuid)),
                        )
                        .select(SubmissionRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let bonus_latched = existing
                        .as_ref()
                        .is_some_and(|row| row.proof_bonus_awarded);
                    let score = scoring::score(
                        points_reward,
                        draft.people_connected,
                        !draft.files.is_empty(),
                        bonus_latched,
                    );
                    let delta = scoring::totals_delta(
                        score.points,
                        draft.people_connected,
                        existing
                            .as_ref()
                            .map(|row| (row.points_earned, row.people_connected)),
                    );

                    let now = Utc::now();
                    let submission_id = match &existing {
                        Some(row) => {
                            let update = SubmissionResubmit {
                                status_text: &draft.status_text,
                                people_connected: draft.people_connected,
                                points_earned: score.points,
                                proof_bonus_awarded: score.proof_bonus_awarded,
                                is_completed: true,
                                updated_at: now,
                            };
                            diesel::update(
                                submissions::table.filter(submissions::id.eq(row.id)),
                            )
                            .set(&update)
                            .execute(conn)
                            .await?;
                            row.id
                        }
                        None => {
                            let new_row = NewSubmissionRow {
                                id: Uuid::new_v4(),
                                user_id: user_uuid,
                                task_id: task_uuid,
                                day: task_day,
                                status_text: &draft.status_text,
                                people_connected: draft.people_connected,
                                points_earned: score.points,
                                proof_bonus_awarded: score.proof_bonus_awarded,
                                is_completed: true,
                                submitted_at: now,
                                updated_at: now,
                            };
                            diesel::insert_into(submissions::table)
                                .values(&new_row)
                                .execute(conn)
                                .await?;
                            new_row.id
                        }
                    };

                    if !draft.files.is_empty() {
                        let file_rows: Vec<NewSubmissionFileRow<'_>> = draft
                            .files
                            .iter()
                            .map(|file| NewSubmissionFileRow {
                                id: Uuid::new_v4(),
                                submission_id,
                                file_url: &file.file_url,
                                file_type: file.file_type.as_deref(),
                                uploaded_at: now,
                            })
                            .collect();
                        diesel::insert_into(submission_files::table)
                            .values(&file_rows)
                            .execute(conn)
                            .await?;
                    }

                    let advanced_day = if task_day == current_day {
                        current_day + 1
                    } else {
                        current_day
                    };
                    diesel::update(users::table.filter(users::id.eq(user_uuid)))
                        .set((
                            users::total_points.eq(users::total_points + delta.points),
                            users::total_referrals
                                .eq(users::total_referrals + delta.referrals),
                            users::current_day.eq(advanced_day),
                        ))
                        .execute(conn)
                        .await?;

                    let row: SubmissionRow = submissions::table
                        .filter(submissions::id.eq(submission_id))
                        .select(SubmissionRow::as_select())
                        .first(conn)
                        .await?;
                    let files = load_files(conn, &[submission_id]).await?;

                    Ok(row.into_domain(files))
                }
                .scope_boxed()
            })
            .await?;

        Ok(submission)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Submission>, SubmissionLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubmissionRow> = submissions::table
            .filter(submissions::user_id.eq(user_id.as_uuid()))
            .order(submissions::day.asc())
            .select(SubmissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let files = load_files(&mut conn, &ids).await.map_err(map_diesel_error)?;

        Ok(assemble(rows, files))
    }

    async fn find_for_task(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Submission>, SubmissionLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = submissions::table
            .filter(
                submissions::user_id
                    .eq(user_id.as_uuid())
                    .and(submissions::task_id.eq(task_id.as_uuid())),
            )
            .select(SubmissionRow::as_select())
            .first::<SubmissionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let files = load_files(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(row.into_domain(files)))
    }

    async fn completed_task_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<TaskId>, SubmissionLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<Uuid> = submissions::table
            .filter(
                submissions::user_id
                    .eq(user_id.as_uuid())
                    .and(submissions::is_completed.eq(true)),
            )
            .select(submissions::task_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(TaskId::from_uuid).collect())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<i64, SubmissionLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        submissions::table
            .filter(submissions::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and file assembly.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn submission_row(id: Uuid) -> SubmissionRow {
        let now = Utc::now();
        SubmissionRow {
            id,
            user_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            day: 1,
            status_text: "done".into(),
            people_connected: 2,
            points_earned: 75,
            proof_bonus_awarded: false,
            is_completed: true,
            submitted_at: now,
            updated_at: now,
            reviewed_by: None,
            review_notes: None,
            reviewed_at: None,
        }
    }

    fn file_row(submission_id: Uuid) -> SubmissionFileRow {
        SubmissionFileRow {
            id: Uuid::new_v4(),
            submission_id,
            file_url: "/uploads/proof.png".into(),
            file_type: Some("image/png".into()),
            uploaded_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("pool exhausted"));
        assert!(matches!(mapped, SubmissionLedgerError::Connection { .. }));
    }

    #[rstest]
    fn tx_user_missing_maps_to_user_missing() {
        let mapped: SubmissionLedgerError = TxError::UserMissing("gone".into()).into();
        assert!(matches!(mapped, SubmissionLedgerError::UserMissing { .. }));
    }

    #[rstest]
    fn assemble_attaches_files_to_their_submissions() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let rows = vec![submission_row(first), submission_row(second)];
        let files = vec![file_row(second), file_row(first), file_row(second)];

        let submissions = assemble(rows, files);

        assert_eq!(submissions[0].files.len(), 1);
        assert_eq!(submissions[1].files.len(), 2);
    }
}
