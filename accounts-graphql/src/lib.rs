//! GraphQL surface for the accounts service.
//!
//! The resolvers are thin: parse inputs into domain newtypes, delegate to
//! a use case, and map any failure through [`error::ApiError`] - the
//! single adapter between domain failures and the protocol's error
//! representation. Ports are attached to the schema as data; the
//! per-request [`accounts_core::Principal`] is injected by the HTTP layer
//! before execution.

pub mod error;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

pub use error::ApiError;
pub use schema::{AccountsSchema, build_schema};
