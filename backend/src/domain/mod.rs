//! Domain entities, pure programme rules, and ports.
//!
//! Purpose: define the strongly typed model of the ambassador programme and
//! the transport-agnostic services that drive it. Inbound adapters call the
//! driving ports re-exported from [`ports`]; outbound adapters implement the
//! driven ports. Everything here is free of HTTP and database concerns.

pub mod account_service;
pub mod admin_service;
pub mod catalog_service;
pub mod eligibility;
pub mod error;
pub mod leaderboard_service;
pub mod ports;
pub mod scoring;
pub mod submission;
pub mod submission_service;
pub mod task;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountServiceImpl;
pub use self::admin_service::AdminServiceImpl;
pub use self::catalog_service::TaskCatalogServiceImpl;
pub use self::eligibility::{EligibleTask, TaskStatus, available_tasks, current_day};
pub use self::error::{Error, ErrorCode};
pub use self::leaderboard_service::LeaderboardQueryImpl;
pub use self::submission::{Submission, SubmissionDraft, SubmissionFile, SubmissionId, StoredFile};
pub use self::submission_service::SubmissionServiceImpl;
pub use self::task::{NewTask, Task, TaskChanges, TaskId, TaskKind};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AccountStatus, EmailAddress, EmailValidationError, NewUser, Role, User, UserId,
};
