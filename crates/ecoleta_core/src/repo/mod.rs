//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate input before any SQL mutation.
//! - Repository APIs return semantic errors (`LocationNotFound`,
//!   `ItemNotFound`) in addition to DB transport errors.

mod error;
pub mod item_repo;
pub mod location_repo;
mod schema;

pub use error::{RepoError, RepoResult};
