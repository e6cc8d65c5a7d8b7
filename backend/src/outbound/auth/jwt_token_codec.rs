//! HS256 JWT implementation of the `TokenCodec` port.
//!
//! Tokens carry the user id as a custom `user_id` claim plus the standard
//! `exp` expiry. There is no refresh mechanism; clients re-authenticate
//! when a token expires.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::user::UserId;

/// Token lifetime in days.
const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    exp: i64,
}

/// JWT codec signing and verifying with a shared HS256 secret.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    /// Create a codec keyed on the given shared secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let expires_at = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|err| {
            TokenError::Issuance {
                message: err.to_string(),
            }
        })
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed {
                        message: err.to_string(),
                    },
                }
            })?;

        UserId::parse(&data.claims.user_id).map_err(|err| TokenError::Malformed {
            message: format!("subject is not a UUID: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    #[rstest]
    fn issued_tokens_verify_back_to_the_same_subject() {
        let codec = JwtTokenCodec::new(SECRET);
        let user_id = UserId::generate();

        let token = codec.issue(&user_id).expect("issue should succeed");
        let subject = codec.verify(&token).expect("verify should succeed");

        assert_eq!(subject, user_id);
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_malformed() {
        let codec = JwtTokenCodec::new(SECRET);
        let other = JwtTokenCodec::new(b"different-secret");

        let token = other.issue(&UserId::generate()).expect("issue");
        let err = codec.verify(&token).expect_err("verify should fail");

        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[rstest]
    fn garbage_tokens_are_malformed() {
        let codec = JwtTokenCodec::new(SECRET);
        let err = codec.verify("not.a.token").expect_err("verify should fail");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[rstest]
    fn non_uuid_subjects_are_rejected() {
        let codec = JwtTokenCodec::new(SECRET);
        let claims = Claims {
            user_id: "not-a-uuid".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &codec.encoding_key).expect("encode");

        let err = codec.verify(&token).expect_err("verify should fail");
        assert!(matches!(err, TokenError::Malformed { .. }));
    }
}
