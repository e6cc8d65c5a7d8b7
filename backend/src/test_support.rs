//! In-memory port adapters for integration tests.
//!
//! These adapters mirror the semantics of the Diesel-backed ones closely
//! enough to drive full HTTP flows without a database: the ledger applies
//! the same scoring, totals-delta, and day-advance rules, and the user store
//! enforces email uniqueness.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CollegePoints, FileStore, FileStoreError, ReportingError, ReportingRepository,
    SubmissionCounts, SubmissionLedger, SubmissionLedgerError, TaskPersistenceError,
    TaskRepository, UserCounts, UserPersistenceError, UserRepository,
};
use crate::domain::scoring;
use crate::domain::submission::{Submission, SubmissionDraft, SubmissionFile, SubmissionId};
use crate::domain::task::{NewTask, Task, TaskChanges, TaskId};
use crate::domain::user::{AccountStatus, EmailAddress, NewUser, Role, User, UserId};

/// Shared mutable state behind the in-memory adapters.
#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    tasks: HashMap<TaskId, Task>,
    task_order: Vec<TaskId>,
    submissions: HashMap<(UserId, TaskId), Submission>,
}

/// Handle to one in-memory backend shared by all its adapters.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// User repository view over this backend.
    #[must_use]
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.store.clone(),
        }
    }

    /// Task repository view over this backend.
    #[must_use]
    pub fn tasks(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository {
            store: self.store.clone(),
        }
    }

    /// Submission ledger view over this backend.
    #[must_use]
    pub fn ledger(&self) -> InMemorySubmissionLedger {
        InMemorySubmissionLedger {
            store: self.store.clone(),
        }
    }

    /// Reporting view over this backend.
    #[must_use]
    pub fn reporting(&self) -> InMemoryReportingRepository {
        InMemoryReportingRepository {
            store: self.store.clone(),
        }
    }

    /// Read a user back out, for assertions.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<User> {
        self.store.lock().expect("store lock").users.get(id).cloned()
    }

    /// Promote a user to admin, bypassing the registration flow.
    pub fn make_admin(&self, id: &UserId) {
        let mut store = self.store.lock().expect("store lock");
        if let Some(user) = store.users.get_mut(id) {
            user.role = Role::Admin;
        }
    }
}

/// In-memory [`UserRepository`].
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: NewUser,
        registered_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        if store.users.values().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }

        let created = User {
            id: UserId::generate(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            college: user.college,
            group_leader: user.group_leader,
            role: user.role,
            current_day: 0,
            total_points: 0,
            total_referrals: 0,
            registered_at,
            last_login_at: None,
            is_active: true,
            status: AccountStatus::Active,
        };
        store.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.users.get(id).cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        name: Option<String>,
        college: Option<String>,
        group_leader: Option<String>,
    ) -> Result<User, UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let user = store
            .users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(college) = college {
            user.college = college;
        }
        if let Some(group_leader) = group_leader {
            user.group_leader = group_leader;
        }
        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let user = store
            .users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        if let Some(user) = store.users.get_mut(id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn set_status(
        &self,
        id: &UserId,
        status: AccountStatus,
    ) -> Result<User, UserPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let user = store
            .users
            .get_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))?;
        user.status = status;
        user.is_active = status == AccountStatus::Active;
        Ok(user.clone())
    }

    async fn count_active_with_more_points(
        &self,
        points: i32,
    ) -> Result<i64, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        let count = store
            .users
            .values()
            .filter(|u| u.is_active && u.total_points > points)
            .count();
        Ok(count as i64)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        let mut users: Vec<User> = store.users.values().filter(|u| u.is_active).cloned().collect();
        users.sort_by(|a, b| {
            (b.total_points, b.total_referrals).cmp(&(a.total_points, a.total_referrals))
        });
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.users.values().cloned().collect())
    }
}

/// In-memory [`TaskRepository`].
#[derive(Clone)]
pub struct InMemoryTaskRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, TaskPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let now = Utc::now();
        let created = Task {
            id: TaskId::generate(),
            day: task.day,
            title: task.title,
            description: task.description,
            task_type: task.task_type,
            points_reward: task.points_reward,
            is_active: task.is_active,
            created_at: now,
            updated_at: now,
        };
        store.task_order.push(created.id);
        store.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, TaskPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        let task = store
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskPersistenceError::not_found(id.to_string()))?;
        if let Some(day) = changes.day {
            task.day = day;
        }
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(task_type) = changes.task_type {
            task.task_type = task_type;
        }
        if let Some(points_reward) = changes.points_reward {
            task.points_reward = points_reward;
        }
        if let Some(is_active) = changes.is_active {
            task.is_active = is_active;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskPersistenceError> {
        let mut store = self.store.lock().expect("store lock");
        store
            .tasks
            .remove(id)
            .ok_or_else(|| TaskPersistenceError::not_found(id.to_string()))?;
        store.task_order.retain(|task_id| task_id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.tasks.get(id).cloned())
    }

    async fn find_by_day(&self, day: i32) -> Result<Option<Task>, TaskPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .task_order
            .iter()
            .filter_map(|id| store.tasks.get(id))
            .find(|task| task.day == day && task.is_active)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let store = self.store.lock().expect("store lock");
        let mut tasks: Vec<Task> = store.tasks.values().filter(|t| t.is_active).cloned().collect();
        tasks.sort_by_key(|task| task.day);
        Ok(tasks)
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let store = self.store.lock().expect("store lock");
        let mut tasks: Vec<Task> = store.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| task.day);
        Ok(tasks)
    }

    async fn count(&self) -> Result<i64, TaskPersistenceError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.tasks.len() as i64)
    }
}

/// In-memory [`SubmissionLedger`] applying the same scoring and day-advance
/// rules as the transactional Diesel adapter.
#[derive(Clone)]
pub struct InMemorySubmissionLedger {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl SubmissionLedger for InMemorySubmissionLedger {
    async fn upsert(
        &self,
        user_id: &UserId,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Submission, SubmissionLedgerError> {
        let mut store = self.store.lock().expect("store lock");
        if !store.users.contains_key(user_id) {
            return Err(SubmissionLedgerError::user_missing(user_id.to_string()));
        }

        let key = (*user_id, task.id);
        let existing = store.submissions.get(&key).cloned();
        let bonus_latched = existing.as_ref().is_some_and(|s| s.proof_bonus_awarded);
        let score = scoring::score(
            task.points_reward,
            draft.people_connected,
            !draft.files.is_empty(),
            bonus_latched,
        );
        let delta = scoring::totals_delta(
            score.points,
            draft.people_connected,
            existing.as_ref().map(|s| (s.points_earned, s.people_connected)),
        );

        let now = Utc::now();
        let submission_id = existing
            .as_ref()
            .map_or_else(SubmissionId::generate, |s| s.id);
        let submitted_at = existing.as_ref().map_or(now, |s| s.submitted_at);
        let mut files = existing.map(|s| s.files).unwrap_or_default();
        files.extend(draft.files.into_iter().map(|file| SubmissionFile {
            id: Uuid::new_v4(),
            submission_id,
            file_url: file.file_url,
            file_type: file.file_type,
            uploaded_at: now,
        }));

        let submission = Submission {
            id: submission_id,
            user_id: *user_id,
            task_id: task.id,
            day: task.day,
            status_text: draft.status_text,
            people_connected: draft.people_connected,
            points_earned: score.points,
            proof_bonus_awarded: score.proof_bonus_awarded,
            is_completed: true,
            submitted_at,
            updated_at: now,
            reviewed_by: None,
            review_notes: None,
            reviewed_at: None,
            files,
        };
        store.submissions.insert(key, submission.clone());

        let user = store.users.get_mut(user_id).expect("user checked above");
        user.total_points += delta.points;
        user.total_referrals += delta.referrals;
        if task.day == user.current_day {
            user.current_day += 1;
        }

        Ok(submission)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Submission>, SubmissionLedgerError> {
        let store = self.store.lock().expect("store lock");
        let mut submissions: Vec<Submission> = store
            .submissions
            .values()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        submissions.sort_by_key(|s| s.day);
        Ok(submissions)
    }

    async fn find_for_task(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Submission>, SubmissionLedgerError> {
        let store = self.store.lock().expect("store lock");
        Ok(store.submissions.get(&(*user_id, *task_id)).cloned())
    }

    async fn completed_task_ids(
        &self,
        user_id: &UserId,
    ) -> Result<std::collections::HashSet<TaskId>, SubmissionLedgerError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .submissions
            .values()
            .filter(|s| &s.user_id == user_id && s.is_completed)
            .map(|s| s.task_id)
            .collect())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<i64, SubmissionLedgerError> {
        let store = self.store.lock().expect("store lock");
        let count = store
            .submissions
            .values()
            .filter(|s| &s.user_id == user_id)
            .count();
        Ok(count as i64)
    }
}

/// In-memory [`ReportingRepository`] computing aggregates on demand.
#[derive(Clone)]
pub struct InMemoryReportingRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl ReportingRepository for InMemoryReportingRepository {
    async fn user_counts(&self) -> Result<UserCounts, ReportingError> {
        let store = self.store.lock().expect("store lock");
        let mut counts = UserCounts::default();
        for user in store.users.values() {
            match user.role {
                Role::Admin => counts.admins += 1,
                Role::Ambassador => counts.ambassadors += 1,
            }
            match user.status {
                AccountStatus::Active => counts.active += 1,
                AccountStatus::Inactive => counts.inactive += 1,
                AccountStatus::Suspended => counts.suspended += 1,
            }
        }
        Ok(counts)
    }

    async fn submission_counts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<SubmissionCounts, ReportingError> {
        let store = self.store.lock().expect("store lock");
        let total = store.submissions.len() as i64;
        let last_day = store
            .submissions
            .values()
            .filter(|s| s.updated_at >= now - Duration::hours(24))
            .count() as i64;
        let last_week = store
            .submissions
            .values()
            .filter(|s| s.updated_at >= now - Duration::days(7))
            .count() as i64;
        Ok(SubmissionCounts {
            total,
            last_day,
            last_week,
        })
    }

    async fn college_points(&self) -> Result<Vec<CollegePoints>, ReportingError> {
        let store = self.store.lock().expect("store lock");
        let mut by_college: HashMap<String, i64> = HashMap::new();
        for user in store.users.values().filter(|u| u.is_active) {
            *by_college.entry(user.college.clone()).or_default() += i64::from(user.total_points);
        }
        let mut colleges: Vec<CollegePoints> = by_college
            .into_iter()
            .map(|(college, total_points)| CollegePoints {
                college,
                total_points,
            })
            .collect();
        colleges.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        Ok(colleges)
    }

    async fn active_point_totals(&self) -> Result<Vec<i32>, ReportingError> {
        let store = self.store.lock().expect("store lock");
        Ok(store
            .users
            .values()
            .filter(|u| u.is_active)
            .map(|u| u.total_points)
            .collect())
    }
}

/// File store that records uploads in memory instead of touching disk.
#[derive(Clone, Default)]
pub struct RecordingFileStore {
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
}

impl RecordingFileStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored `(filename, byte length)` pairs, in upload order.
    #[must_use]
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().expect("uploads lock").clone()
    }
}

#[async_trait]
impl FileStore for RecordingFileStore {
    async fn store<'a>(
        &self,
        bytes: &[u8],
        filename: &str,
        _content_type: Option<&'a str>,
    ) -> Result<String, FileStoreError> {
        if bytes.is_empty() {
            return Err(FileStoreError::rejected("uploaded file is empty"));
        }
        self.uploads
            .lock()
            .expect("uploads lock")
            .push((filename.to_owned(), bytes.len()));
        Ok(format!("/uploads/{}_{filename}", Uuid::new_v4()))
    }
}
