//! Backend library for the ambassador programme.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, the pure
//! eligibility and scoring rules, and port traits; `inbound` adapts HTTP
//! requests onto the driving ports; `outbound` implements the driven ports
//! against PostgreSQL, the token codec, and file storage; `server` wires the
//! Actix application together.

// `diesel::dsl` glob-re-exports `sum` from two modules; rustc's
// `ambiguous_glob_imports` future-incompat lint only honours a crate-level
// override (see rust-lang/rust#114095).
#![allow(ambiguous_glob_imports)]

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::trace::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
