//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions into domain entities live here so every adapter maps
//! rows the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::submission::{Submission, SubmissionFile, SubmissionId};
use crate::domain::task::{Task, TaskId, TaskKind};
use crate::domain::user::{AccountStatus, EmailAddress, Role, User, UserId};

use super::schema::{submission_files, submissions, tasks, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub college: String,
    pub group_leader: String,
    pub role: String,
    pub current_day: i32,
    pub total_points: i32,
    pub total_referrals: i32,
    pub registered_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub status: String,
}

impl UserRow {
    /// Convert the row into a domain user.
    ///
    /// The email was validated on the way in; a row failing validation now
    /// indicates out-of-band writes and is surfaced as an error string for
    /// the adapter to wrap.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let email = EmailAddress::new(&self.email)
            .map_err(|err| format!("stored email {:?} is invalid: {err}", self.email))?;
        let status = AccountStatus::parse(&self.status)
            .ok_or_else(|| format!("stored status {:?} is invalid", self.status))?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            email,
            password_hash: self.password_hash,
            name: self.name,
            college: self.college,
            group_leader: self.group_leader,
            role: Role::from_str_lossy(&self.role),
            current_day: self.current_day,
            total_points: self.total_points,
            total_referrals: self.total_referrals,
            registered_at: self.registered_at,
            last_login_at: self.last_login_at,
            is_active: self.is_active,
            status,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub college: &'a str,
    pub group_leader: &'a str,
    pub role: &'a str,
    pub current_day: i32,
    pub total_points: i32,
    pub total_referrals: i32,
    pub registered_at: DateTime<Utc>,
    pub is_active: bool,
    pub status: &'a str,
}

/// Changeset for self-service profile updates; `None` leaves a column alone.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset {
    pub name: Option<String>,
    pub college: Option<String>,
    pub group_leader: Option<String>,
}

// ---------------------------------------------------------------------------
// Task models
// ---------------------------------------------------------------------------

/// Row struct for reading from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub day: i32,
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub points_reward: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::from_uuid(row.id),
            day: row.day,
            title: row.title,
            description: row.description,
            task_type: TaskKind::from_str_lossy(&row.task_type),
            points_reward: row.points_reward,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating new task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub id: Uuid,
    pub day: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub task_type: &'a str,
    pub points_reward: i32,
    pub is_active: bool,
}

/// Changeset for partial task updates; `None` leaves a column alone.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub(crate) struct TaskChangeset {
    pub day: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<String>,
    pub points_reward: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Submission models
// ---------------------------------------------------------------------------

/// Row struct for reading from the submissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub day: i32,
    pub status_text: String,
    pub people_connected: i32,
    pub points_earned: i32,
    pub proof_bonus_awarded: bool,
    pub is_completed: bool,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl SubmissionRow {
    /// Convert the row plus its file rows into a domain submission.
    pub(crate) fn into_domain(self, files: Vec<SubmissionFileRow>) -> Submission {
        Submission {
            id: SubmissionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            task_id: TaskId::from_uuid(self.task_id),
            day: self.day,
            status_text: self.status_text,
            people_connected: self.people_connected,
            points_earned: self.points_earned,
            proof_bonus_awarded: self.proof_bonus_awarded,
            is_completed: self.is_completed,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
            reviewed_by: self.reviewed_by.map(UserId::from_uuid),
            review_notes: self.review_notes,
            reviewed_at: self.reviewed_at,
            files: files.into_iter().map(SubmissionFileRow::into_domain).collect(),
        }
    }
}

/// Insertable struct for creating new submission records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub(crate) struct NewSubmissionRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub day: i32,
    pub status_text: &'a str,
    pub people_connected: i32,
    pub points_earned: i32,
    pub proof_bonus_awarded: bool,
    pub is_completed: bool,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied on resubmission.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = submissions)]
pub(crate) struct SubmissionResubmit<'a> {
    pub status_text: &'a str,
    pub people_connected: i32,
    pub points_earned: i32,
    pub proof_bonus_awarded: bool,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the submission_files table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submission_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionFileRow {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub file_url: String,
    pub file_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl SubmissionFileRow {
    fn into_domain(self) -> SubmissionFile {
        SubmissionFile {
            id: self.id,
            submission_id: SubmissionId::from_uuid(self.submission_id),
            file_url: self.file_url,
            file_type: self.file_type,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Insertable struct for attaching proof files.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submission_files)]
pub(crate) struct NewSubmissionFileRow<'a> {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub file_url: &'a str,
    pub file_type: Option<&'a str>,
    pub uploaded_at: DateTime<Utc>,
}
