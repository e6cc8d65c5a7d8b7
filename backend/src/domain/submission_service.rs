//! Submission flow service.
//!
//! Implements the [`SubmissionService`] driving port: validates eligibility,
//! stores proof files, and hands the draft to the ledger, whose upsert is
//! the single transactional owner of scoring and totals accounting.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::eligibility::is_submittable;
use crate::domain::ports::{
    Clock, FileStore, ProofUpload, SubmissionLedger, SubmissionService, SubmitTaskOutcome,
    SubmitTaskRequest, TaskRepository,
};
use crate::domain::submission::{StoredFile, Submission, SubmissionDraft};
use crate::domain::task::TaskId;
use crate::domain::user::User;

/// Submission service implementing the [`SubmissionService`] driving port.
#[derive(Clone)]
pub struct SubmissionServiceImpl<T, L, F, C> {
    tasks: Arc<T>,
    ledger: Arc<L>,
    files: Arc<F>,
    clock: Arc<C>,
}

impl<T, L, F, C> SubmissionServiceImpl<T, L, F, C> {
    /// Create the service over its collaborating ports.
    pub fn new(tasks: Arc<T>, ledger: Arc<L>, files: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            ledger,
            files,
            clock,
        }
    }
}

#[async_trait]
impl<T, L, F, C> SubmissionService for SubmissionServiceImpl<T, L, F, C>
where
    T: TaskRepository,
    L: SubmissionLedger,
    F: FileStore,
    C: Clock,
{
    async fn submit(
        &self,
        user: &User,
        request: SubmitTaskRequest,
        files: Vec<ProofUpload>,
    ) -> Result<SubmitTaskOutcome, Error> {
        if request.people_connected < 0 {
            return Err(Error::invalid_request(
                "people_connected must not be negative",
            ));
        }

        let task = self
            .tasks
            .find_by_id(&request.task_id)
            .await?
            .filter(|task| task.is_active)
            .ok_or_else(|| Error::not_found("task not found"))?;

        let completed = self.ledger.completed_task_ids(&user.id).await?;
        if !is_submittable(&task, user.registered_at, self.clock.now(), &completed) {
            return Err(Error::forbidden("task is not yet available"));
        }

        let mut stored = Vec::with_capacity(files.len());
        for upload in files {
            let file_url = self
                .files
                .store(
                    &upload.bytes,
                    &upload.filename,
                    upload.content_type.as_deref(),
                )
                .await?;
            stored.push(StoredFile {
                file_url,
                file_type: upload.content_type,
            });
        }

        let submission = self
            .ledger
            .upsert(
                &user.id,
                &task,
                SubmissionDraft {
                    status_text: request.status_text.trim().to_owned(),
                    people_connected: request.people_connected,
                    files: stored,
                },
            )
            .await?;
        tracing::info!(
            user_id = %user.id,
            task_id = %task.id,
            points = submission.points_earned,
            "recorded task submission"
        );

        Ok(SubmitTaskOutcome {
            message: "Task submitted successfully".to_owned(),
            points_earned: submission.points_earned,
            submission,
        })
    }

    async fn my_submissions(&self, user: &User) -> Result<Vec<Submission>, Error> {
        Ok(self.ledger.list_for_user(&user.id).await?)
    }

    async fn submission_for_task(
        &self,
        user: &User,
        task_id: TaskId,
    ) -> Result<Option<Submission>, Error> {
        Ok(self.ledger.find_for_task(&user.id, &task_id).await?)
    }
}

#[cfg(test)]
#[path = "submission_service_tests.rs"]
mod tests;
