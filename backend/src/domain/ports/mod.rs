//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account;
mod admin;
mod catalog;
mod clock;
mod file_store;
mod leaderboard;
mod password_hasher;
mod reporting_repository;
mod submission_ledger;
mod submissions;
mod task_repository;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use account::MockAccountService;
pub use account::{
    AccountService, AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest, UserProfile,
};
#[cfg(test)]
pub use admin::MockAdminService;
pub use admin::{AdminService, AdminUserSummary, PerformanceBuckets, ProgramAnalytics};
#[cfg(test)]
pub use catalog::MockTaskCatalogService;
pub use catalog::{CreateTaskRequest, TaskCatalogService, UpdateTaskRequest};
#[cfg(test)]
pub use clock::MockClock;
pub use clock::{Clock, FixedClock, SystemClock};
#[cfg(test)]
pub use file_store::MockFileStore;
pub use file_store::{FileStore, FileStoreError};
#[cfg(test)]
pub use leaderboard::MockLeaderboardQuery;
pub use leaderboard::{DashboardStats, LeaderboardEntry, LeaderboardQuery};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::PasswordHasher;
#[cfg(test)]
pub use reporting_repository::MockReportingRepository;
pub use reporting_repository::{
    CollegePoints, ReportingError, ReportingRepository, SubmissionCounts, UserCounts,
};
#[cfg(test)]
pub use submission_ledger::MockSubmissionLedger;
pub use submission_ledger::{SubmissionLedger, SubmissionLedgerError};
#[cfg(test)]
pub use submissions::MockSubmissionService;
pub use submissions::{ProofUpload, SubmissionService, SubmitTaskOutcome, SubmitTaskRequest};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
