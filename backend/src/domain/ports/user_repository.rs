//! Port for user account persistence and ranking reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::user::{AccountStatus, EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The email is already registered.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
        /// The addressed user does not exist.
        NotFound { message: String } =>
            "user not found: {message}",
    }
}

impl From<UserPersistenceError> for crate::domain::Error {
    fn from(error: UserPersistenceError) -> Self {
        match error {
            UserPersistenceError::Connection { message } => {
                tracing::error!(%message, "user repository unavailable");
                Self::service_unavailable("service temporarily unavailable")
            }
            UserPersistenceError::Query { message } => {
                tracing::error!(%message, "user repository query failed");
                Self::internal("internal error")
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Self::conflict("email already registered")
            }
            UserPersistenceError::NotFound { message } => Self::not_found(message),
        }
    }
}

/// Port for writing and reading user accounts.
///
/// Running totals (`total_points`, `total_referrals`) are owned by the
/// submission ledger and are deliberately absent here; only the ledger's
/// transactional upsert may touch them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account registered at the given instant.
    async fn insert(
        &self,
        user: NewUser,
        registered_at: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError>;

    /// Find an account by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Find an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Apply a partial profile update and return the updated account.
    async fn update_profile(
        &self,
        id: &UserId,
        name: Option<String>,
        college: Option<String>,
        group_leader: Option<String>,
    ) -> Result<User, UserPersistenceError>;

    /// Replace the stored password digest.
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), UserPersistenceError>;

    /// Record a successful login.
    async fn record_login(&self, id: &UserId, at: DateTime<Utc>)
    -> Result<(), UserPersistenceError>;

    /// Transition the account status; `is_active` follows
    /// (`true` only for [`AccountStatus::Active`]).
    async fn set_status(
        &self,
        id: &UserId,
        status: AccountStatus,
    ) -> Result<User, UserPersistenceError>;

    /// Count active users with strictly more points; used by the
    /// strict-count rank rule.
    async fn count_active_with_more_points(
        &self,
        points: i32,
    ) -> Result<i64, UserPersistenceError>;

    /// Top active users ordered by `(total_points desc, total_referrals desc)`.
    async fn leaderboard(&self, limit: i64) -> Result<Vec<User>, UserPersistenceError>;

    /// All accounts, for admin listings.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
