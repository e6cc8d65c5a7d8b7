//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod leaderboard;
pub mod state;
pub mod submissions;
pub mod tasks;
pub mod users;

pub use error::ApiResult;
