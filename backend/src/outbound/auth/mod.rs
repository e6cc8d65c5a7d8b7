//! Credential and token adapters.

pub mod jwt_token_codec;
pub mod sha256_password_hasher;

pub use jwt_token_codec::JwtTokenCodec;
pub use sha256_password_hasher::Sha256PasswordHasher;
