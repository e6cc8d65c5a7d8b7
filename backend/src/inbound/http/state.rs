//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, AdminService, LeaderboardQuery, SubmissionService, TaskCatalogService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and self-service account flows.
    pub accounts: Arc<dyn AccountService>,
    /// Catalog reads and admin CRUD.
    pub catalog: Arc<dyn TaskCatalogService>,
    /// Submission recording and reads.
    pub submissions: Arc<dyn SubmissionService>,
    /// Leaderboard and dashboard reads.
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    /// Admin reporting and user management.
    pub admin: Arc<dyn AdminService>,
}
