//! Outbound adapters implementing the domain's driven ports.

pub mod auth;
pub mod persistence;
pub mod storage;
