//! Account lifecycle and authentication service.
//!
//! Implements the [`AccountService`] driving port over the user repository,
//! password hasher, token codec, and clock ports. Authorization is
//! enforced here: suspended or deactivated ambassadors are rejected on
//! every authenticated request, not just at login.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    AccountService, AuthResponse, ChangePasswordRequest, Clock, LoginRequest, PasswordHasher,
    RegisterRequest, TokenCodec, UpdateProfileRequest, UserProfile, UserRepository,
};
use crate::domain::user::{AccountStatus, EmailAddress, NewUser, Role, User};

const MIN_PASSWORD_LENGTH: usize = 8;
const CREDENTIALS_REJECTED: &str = "invalid email or password";

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountServiceImpl<U, H, T, C> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<C>,
}

impl<U, H, T, C> AccountServiceImpl<U, H, T, C> {
    /// Create the service over its collaborating ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

fn validate_password(password: &str) -> Result<(), Error> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::invalid_request(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn required_field(value: &str, field: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

/// Reject authenticated access for accounts an admin has taken out of
/// circulation. Admin accounts bypass the check.
fn enforce_account_status(user: &User) -> Result<(), Error> {
    if user.is_admin() {
        return Ok(());
    }
    match user.status {
        AccountStatus::Active if user.is_active => Ok(()),
        AccountStatus::Suspended => Err(Error::forbidden("account is suspended")),
        _ => Err(Error::forbidden("account is deactivated")),
    }
}

impl<U, H, T, C> AccountServiceImpl<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
    C: Clock,
{
    async fn build_profile(&self, user: &User) -> Result<UserProfile, Error> {
        let ahead = self
            .users
            .count_active_with_more_points(user.total_points)
            .await?;
        Ok(UserProfile {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
            college: user.college.clone(),
            group_leader: user.group_leader.clone(),
            role: user.role,
            current_day: user.current_day,
            total_points: user.total_points,
            total_referrals: user.total_referrals,
            rank_position: ahead + 1,
            registration_date: user.registered_at,
            status: user.status,
        })
    }

    async fn auth_response(&self, user: &User, message: &str) -> Result<AuthResponse, Error> {
        let token = self.tokens.issue(&user.id)?;
        let profile = self.build_profile(user).await?;
        Ok(AuthResponse {
            message: message.to_owned(),
            token,
            user: profile,
        })
    }
}

#[async_trait]
impl<U, H, T, C> AccountService for AccountServiceImpl<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
    C: Clock,
{
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        validate_password(&request.password)?;
        let name = required_field(&request.name, "name")?;
        let college = required_field(&request.college, "college")?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::conflict("email already registered"));
        }

        let new_user = NewUser {
            email,
            password_hash: self.hasher.hash(&request.password),
            name,
            college,
            group_leader: request
                .group_leader
                .map(|leader| leader.trim().to_owned())
                .unwrap_or_default(),
            role: Role::Ambassador,
        };
        let user = self.users.insert(new_user, self.clock.now()).await?;
        tracing::info!(user_id = %user.id, "registered new ambassador");

        self.auth_response(&user, "Registration successful").await
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|_| Error::unauthorized(CREDENTIALS_REJECTED))?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| Error::unauthorized(CREDENTIALS_REJECTED))?;
        if !self.hasher.verify(&request.password, &user.password_hash) {
            return Err(Error::unauthorized(CREDENTIALS_REJECTED));
        }
        enforce_account_status(&user)?;

        self.users.record_login(&user.id, self.clock.now()).await?;
        tracing::info!(user_id = %user.id, "login succeeded");

        self.auth_response(&user, "Login successful").await
    }

    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let subject = self.tokens.verify(token)?;
        let user = self
            .users
            .find_by_id(&subject)
            .await?
            .ok_or_else(|| Error::unauthorized("unknown token subject"))?;
        enforce_account_status(&user)?;
        Ok(user)
    }

    async fn profile(&self, user: &User) -> Result<UserProfile, Error> {
        self.build_profile(user).await
    }

    async fn update_profile(
        &self,
        user: &User,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, Error> {
        let name = request
            .name
            .map(|value| required_field(&value, "name"))
            .transpose()?;
        let college = request
            .college
            .map(|value| required_field(&value, "college"))
            .transpose()?;
        let group_leader = request.group_leader.map(|value| value.trim().to_owned());

        let updated = self
            .users
            .update_profile(&user.id, name, college, group_leader)
            .await?;
        self.build_profile(&updated).await
    }

    async fn change_password(
        &self,
        user: &User,
        request: ChangePasswordRequest,
    ) -> Result<(), Error> {
        if !self
            .hasher
            .verify(&request.current_password, &user.password_hash)
        {
            return Err(Error::unauthorized("current password is incorrect"));
        }
        validate_password(&request.new_password)?;

        let digest = self.hasher.hash(&request.new_password);
        self.users.update_password(&user.id, digest).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
