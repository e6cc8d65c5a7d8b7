//! Submission ledger entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::task::TaskId;
use super::user::UserId;

/// Unique submission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proof artifact attached to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionFile {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning submission.
    pub submission_id: SubmissionId,
    /// Location returned by the file store.
    pub file_url: String,
    /// MIME type reported at upload time, when known.
    pub file_type: Option<String>,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// The authoritative record of one (user, task) submission.
///
/// ## Invariants
/// - At most one submission exists per `(user_id, task_id)`; resubmission
///   updates the existing row and applies point/referral deltas to the
///   user's running totals.
/// - `proof_bonus_awarded` latches on the first submission carrying proof
///   files and is never re-applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    /// Unique identifier.
    pub id: SubmissionId,
    /// Submitting user.
    pub user_id: UserId,
    /// Task submitted against.
    pub task_id: TaskId,
    /// Day index of the task at submission time.
    pub day: i32,
    /// Free-text status report.
    pub status_text: String,
    /// People connected during the activity; each is worth bonus points.
    pub people_connected: i32,
    /// Points credited for this submission, including any proof bonus.
    pub points_earned: i32,
    /// Whether the one-time proof bonus has been granted.
    pub proof_bonus_awarded: bool,
    /// Completion flag; set on every accepted submission.
    pub is_completed: bool,
    /// First-submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Last resubmission timestamp.
    pub updated_at: DateTime<Utc>,
    /// Reviewer identifier, when reviewed.
    pub reviewed_by: Option<UserId>,
    /// Review notes, when reviewed.
    pub review_notes: Option<String>,
    /// Review timestamp, when reviewed.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Attached proof artifacts.
    pub files: Vec<SubmissionFile>,
}

/// Stored proof artifact reference handed to the ledger after upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Location returned by the file store.
    pub file_url: String,
    /// MIME type reported at upload time, when known.
    pub file_type: Option<String>,
}

/// Content of a submission before the ledger scores and records it.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    /// Free-text status report.
    pub status_text: String,
    /// People connected during the activity.
    pub people_connected: i32,
    /// Newly uploaded proof artifacts to attach.
    pub files: Vec<StoredFile>,
}
