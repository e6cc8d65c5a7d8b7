//! HTTP server configuration loaded from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::{env, fs};

use tracing::warn;
use zeroize::Zeroizing;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default upload directory when `UPLOAD_DIR` is unset.
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Runtime configuration for the HTTP server.
pub struct ServerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Shared secret for signing bearer tokens; wiped on drop.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// Directory proof files are written to.
    pub upload_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` is required. The token secret comes from
    /// `JWT_SECRET_FILE` when set, otherwise `JWT_SECRET`; debug builds fall
    /// back to an ephemeral secret with a warning so local runs work without
    /// setup. `BIND_ADDR` and `UPLOAD_DIR` have sensible defaults.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a required variable is missing or
    /// malformed.
    pub fn from_env() -> std::io::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| std::io::Error::other("DATABASE_URL is not set"))?;

        let jwt_secret = load_jwt_secret()?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into()));

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            upload_dir,
        })
    }
}

fn load_jwt_secret() -> std::io::Result<Zeroizing<Vec<u8>>> {
    if let Ok(path) = env::var("JWT_SECRET_FILE") {
        let bytes = fs::read(&path).map_err(|err| {
            std::io::Error::other(format!("failed to read token secret at {path}: {err}"))
        })?;
        return Ok(Zeroizing::new(bytes));
    }

    if let Ok(secret) = env::var("JWT_SECRET") {
        return Ok(Zeroizing::new(secret.into_bytes()));
    }

    if cfg!(debug_assertions) {
        warn!("using ephemeral token secret (dev only); tokens do not survive restarts");
        return Ok(Zeroizing::new(
            uuid::Uuid::new_v4().as_bytes().to_vec(),
        ));
    }

    Err(std::io::Error::other(
        "neither JWT_SECRET_FILE nor JWT_SECRET is set",
    ))
}
