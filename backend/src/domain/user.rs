//! User identity, roles, and account state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
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

    /// Parse from a string representation.
    ///
    /// # Errors
    /// Returns the underlying [`uuid::Error`] when `value` is not a UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// The address is empty once trimmed.
    #[error("email must not be empty")]
    Empty,
    /// The address has no `@` separating local part and host.
    #[error("email must contain an '@'")]
    MissingAtSign,
}

/// Validated email address, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Errors
    /// Returns [`EmailValidationError`] when the address is empty or lacks
    /// an `@`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailValidationError::MissingAtSign);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// The normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Programme role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End user completing day-indexed tasks for points.
    Ambassador,
    /// Operator managing the catalog, users, and reviews.
    Admin,
}

impl Role {
    /// Stable string form used in persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ambassador => "ambassador",
            Self::Admin => "admin",
        }
    }

    /// Parse the persisted string form; unknown values fall back to
    /// [`Role::Ambassador`], the least privileged role.
    #[must_use]
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            _ => Self::Ambassador,
        }
    }
}

/// Account lifecycle state, driven by admin status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account in good standing.
    Active,
    /// Account disabled by an administrator; excluded from rankings.
    Inactive,
    /// Account suspended pending review; all non-admin access rejected.
    Suspended,
}

impl AccountStatus {
    /// Stable string form used in persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    /// Parse the persisted string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// A registered programme participant or administrator.
///
/// `current_day` is a dashboard projection advanced when the user completes
/// the task for their stored day; the eligibility engine derives its own day
/// from `registered_at` and never reads this counter.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: EmailAddress,
    /// Digest of the account password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// College or campus the ambassador represents.
    pub college: String,
    /// Name of the user's group leader, if any.
    pub group_leader: String,
    /// Programme role.
    pub role: Role,
    /// Dashboard day counter (see type docs).
    pub current_day: i32,
    /// Running points total maintained by the submission ledger.
    pub total_points: i32,
    /// Running "people connected" total maintained by the submission ledger.
    pub total_referrals: i32,
    /// Registration timestamp; anchor for the eligibility engine.
    pub registered_at: DateTime<Utc>,
    /// Last successful login, if the user has logged in.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Soft-delete flag; inactive users never appear on leaderboards.
    pub is_active: bool,
    /// Admin-driven account status.
    pub status: AccountStatus,
}

impl User {
    /// True when the user carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Data required to create a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login email.
    pub email: EmailAddress,
    /// Digest of the account password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// College or campus the ambassador represents.
    pub college: String,
    /// Name of the user's group leader, if any.
    pub group_leader: String,
    /// Programme role; registration always assigns [`Role::Ambassador`].
    pub role: Role,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Ada@Example.COM", "ada@example.com")]
    #[case("  spaced@host  ", "spaced@host")]
    fn email_is_normalised(#[case] input: &str, #[case] expected: &str) {
        let email = EmailAddress::new(input).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("no-at-sign", EmailValidationError::MissingAtSign)]
    fn email_rejects_invalid_input(#[case] input: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(input), Err(expected));
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("ambassador", Role::Ambassador)]
    #[case("garbage", Role::Ambassador)]
    fn role_parse_is_lossy_towards_least_privilege(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(Role::from_str_lossy(input), expected);
    }

    #[rstest]
    #[case("active", Some(AccountStatus::Active))]
    #[case("inactive", Some(AccountStatus::Inactive))]
    #[case("suspended", Some(AccountStatus::Suspended))]
    #[case("deleted", None)]
    fn status_parse_round_trip(#[case] input: &str, #[case] expected: Option<AccountStatus>) {
        assert_eq!(AccountStatus::parse(input), expected);
        if let Some(status) = expected {
            assert_eq!(status.as_str(), input);
        }
    }
}
