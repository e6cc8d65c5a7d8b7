//! Port for bearer-token issuance and verification.
//!
//! Tokens are stateless: no refresh, no rotation, no server-side revocation
//! before expiry. Account status checks on every request are the only
//! lock-out mechanism.

use crate::domain::user::UserId;

/// Failures verifying or issuing a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,
    /// The token is not a valid signed token for this service.
    #[error("malformed token: {message}")]
    Malformed {
        /// Verification failure detail, kept server-side.
        message: String,
    },
    /// Token creation failed.
    #[error("token issuance failed: {message}")]
    Issuance {
        /// Signing failure detail, kept server-side.
        message: String,
    },
}

impl From<TokenError> for crate::domain::Error {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => Self::unauthorized("token expired"),
            TokenError::Malformed { message } => {
                tracing::debug!(%message, "rejected malformed token");
                Self::unauthorized("invalid token")
            }
            TokenError::Issuance { message } => {
                tracing::error!(%message, "token issuance failed");
                Self::internal("internal error")
            }
        }
    }
}

/// Port for signing and verifying bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a signed token whose subject is the given user.
    ///
    /// # Errors
    /// Returns [`TokenError::Issuance`] when signing fails.
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Verify a token and extract its subject.
    ///
    /// # Errors
    /// Returns [`TokenError::Expired`] for an out-of-date token and
    /// [`TokenError::Malformed`] for anything else that fails validation.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
