//! Core data layer for the recycling collection point directory.
//! This crate is the single source of truth for location/item invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{parse_item_ids, LocationFilter};
pub use model::item::{ItemCategory, ItemId};
pub use model::location::{
    Location, LocationDetail, LocationId, LocationValidationError, NewLocation, PLACEHOLDER_IMAGE,
};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::location_repo::{LocationRepository, SqliteLocationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::location_service::{LocationService, LocationServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
