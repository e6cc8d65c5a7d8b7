//! Driving port for submitting tasks and reading submissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::submission::Submission;
use crate::domain::task::TaskId;
use crate::domain::user::User;

/// Submission payload for `POST /api/submit-task`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitTaskRequest {
    /// Task being submitted against.
    pub task_id: TaskId,
    /// Free-text status report.
    #[serde(default)]
    pub status_text: String,
    /// People connected during the activity.
    #[serde(default)]
    pub people_connected: i32,
}

/// An uploaded proof artifact awaiting storage.
#[derive(Debug, Clone)]
pub struct ProofUpload {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Original filename as uploaded.
    pub filename: String,
    /// MIME type reported by the client, when present.
    pub content_type: Option<String>,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitTaskOutcome {
    /// Human-readable outcome message.
    pub message: String,
    /// Points credited for this submission.
    pub points_earned: i32,
    /// The recorded submission.
    pub submission: Submission,
}

/// Driving port for the submission flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Validate eligibility, store proof files, score, and record the
    /// submission atomically.
    async fn submit(
        &self,
        user: &User,
        request: SubmitTaskRequest,
        files: Vec<ProofUpload>,
    ) -> Result<SubmitTaskOutcome, Error>;

    /// The caller's submissions, day ascending.
    async fn my_submissions(&self, user: &User) -> Result<Vec<Submission>, Error>;

    /// The caller's submission for one task, if any.
    async fn submission_for_task(
        &self,
        user: &User,
        task_id: TaskId,
    ) -> Result<Option<Submission>, Error>;
}
