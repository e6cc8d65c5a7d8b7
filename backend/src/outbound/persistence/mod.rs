//! PostgreSQL persistence adapters built on Diesel.

pub mod diesel_error_mapping;
pub mod diesel_reporting_repository;
pub mod diesel_submission_ledger;
pub mod diesel_task_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_reporting_repository::DieselReportingRepository;
pub use diesel_submission_ledger::DieselSubmissionLedger;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
