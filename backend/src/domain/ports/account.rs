//! Driving port for account lifecycle and authentication.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::user::{AccountStatus, Role, User, UserId};

/// Registration payload for `POST /api/register`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Login email; must be unique.
    pub email: String,
    /// Cleartext password; digested before storage.
    pub password: String,
    /// Display name.
    pub name: String,
    /// College or campus the ambassador represents.
    pub college: String,
    /// Optional group leader name.
    #[serde(default)]
    pub group_leader: Option<String>,
}

/// Login payload for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Cleartext password.
    pub password: String,
}

/// Self-service profile update payload for `PUT /api/profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name, when changed.
    #[serde(default)]
    pub name: Option<String>,
    /// New college, when changed.
    #[serde(default)]
    pub college: Option<String>,
    /// New group leader name, when changed.
    #[serde(default)]
    pub group_leader: Option<String>,
}

/// Payload for `POST /api/change-password`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// The password currently on the account.
    pub current_password: String,
    /// The replacement password.
    pub new_password: String,
}

/// Profile projection returned to the account owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// College or campus.
    pub college: String,
    /// Group leader name; empty when unset.
    pub group_leader: String,
    /// Programme role.
    pub role: Role,
    /// Dashboard day counter.
    pub current_day: i32,
    /// Running points total.
    pub total_points: i32,
    /// Running referral total.
    pub total_referrals: i32,
    /// Strict-count rank: `1 + count(active users with more points)`.
    pub rank_position: i64,
    /// Registration timestamp.
    pub registration_date: DateTime<Utc>,
    /// Account status.
    pub status: AccountStatus,
}

/// Token plus profile returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Human-readable outcome message.
    pub message: String,
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's profile.
    pub user: UserProfile,
}

/// Driving port for registration, login, and self-service account flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new ambassador and issue a token.
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, Error>;

    /// Authenticate credentials and issue a token.
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, Error>;

    /// Resolve a bearer token to a user, enforcing account status.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;

    /// Profile projection, including the rank position.
    async fn profile(&self, user: &User) -> Result<UserProfile, Error>;

    /// Apply a self-service profile update.
    async fn update_profile(
        &self,
        user: &User,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, Error>;

    /// Rotate the account password after verifying the current one.
    async fn change_password(
        &self,
        user: &User,
        request: ChangePasswordRequest,
    ) -> Result<(), Error>;
}
