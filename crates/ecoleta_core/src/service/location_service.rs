//! Location use-case service.
//!
//! # Responsibility
//! - Provide search, detail, registration and image-update entry points.
//! - Collapse repository failures into `NotFound`, `ItemNotFound`,
//!   `Validation` or opaque `Store` outcomes.
//! - Emit metadata-only diagnostics (ids, counts, durations).
//!
//! # Invariants
//! - A failed registration never exposes a location id.
//! - Failures are reported once; retry policy belongs to the caller.

use crate::model::filter::LocationFilter;
use crate::model::item::ItemId;
use crate::model::location::{
    Location, LocationDetail, LocationId, LocationValidationError, NewLocation,
};
use crate::repo::location_repo::LocationRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::time::Instant;
use thiserror::Error;

/// Service error for location use-cases.
#[derive(Debug, Error)]
pub enum LocationServiceError {
    /// Referenced location does not exist.
    #[error("location not found: {0}")]
    NotFound(LocationId),
    /// Registration referenced an unknown item category.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    /// Input rejected before storage access.
    #[error(transparent)]
    Validation(LocationValidationError),
    /// Storage or transaction failure; state is left untouched.
    #[error("store failure: {0}")]
    Store(RepoError),
    /// Internal consistency mismatch between write and read-back.
    #[error("inconsistent location state: {0}")]
    InconsistentState(&'static str),
}

impl From<RepoError> for LocationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::LocationNotFound(id) => Self::NotFound(id),
            RepoError::ItemNotFound(id) => Self::ItemNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

impl LocationServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "location_not_found",
            Self::ItemNotFound(_) => "item_not_found",
            Self::Validation(_) => "invalid_input",
            Self::Store(_) => "store_failure",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

/// Location service facade over repository implementations.
pub struct LocationService<R: LocationRepository> {
    repo: R,
}

impl<R: LocationRepository> LocationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns locations matching `filter`, or every location when unfiltered.
    pub fn search(&self, filter: &LocationFilter) -> Result<Vec<Location>, LocationServiceError> {
        let started_at = Instant::now();
        let mode = match filter {
            LocationFilter::Unfiltered => "all",
            LocationFilter::Filtered { .. } => "filtered",
        };

        match self.repo.search_locations(filter) {
            Ok(locations) => {
                info!(
                    "event=location_search module=service status=ok mode={mode} result_count={} duration_ms={}",
                    locations.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(locations)
            }
            Err(err) => Err(log_failure("location_search", started_at, err.into())),
        }
    }

    /// Gets one location with the titles of the categories it accepts.
    ///
    /// # Errors
    /// - `NotFound` when no location has `id`.
    pub fn get_location(&self, id: LocationId) -> Result<LocationDetail, LocationServiceError> {
        let started_at = Instant::now();
        self.load_detail(id)
            .map_err(|err| log_failure("location_get", started_at, err))
    }

    fn load_detail(&self, id: LocationId) -> Result<LocationDetail, LocationServiceError> {
        let location = self
            .repo
            .get_location(id)?
            .ok_or(LocationServiceError::NotFound(id))?;
        let items = self.repo.list_location_item_titles(id)?;
        Ok(LocationDetail { location, items })
    }

    /// Registers a location and its accepted categories atomically.
    ///
    /// # Errors
    /// - `Validation` for malformed input.
    /// - `ItemNotFound` naming the first unknown category id; nothing is stored.
    /// - `Store` for transaction failures; nothing is stored.
    pub fn register(&mut self, input: &NewLocation) -> Result<Location, LocationServiceError> {
        let started_at = Instant::now();
        info!(
            "event=location_register module=service status=start item_count={}",
            input.item_ids.len()
        );

        match self.repo.register_location(input) {
            Ok(location) => {
                info!(
                    "event=location_register module=service status=ok location_id={} duration_ms={}",
                    location.id,
                    started_at.elapsed().as_millis()
                );
                Ok(location)
            }
            Err(err) => Err(log_failure("location_register", started_at, err.into())),
        }
    }

    /// Records a stored image filename for a location and returns it updated.
    ///
    /// # Errors
    /// - `NotFound` when no location has `id`.
    /// - `Validation` when `image` is blank.
    pub fn set_image(&self, id: LocationId, image: &str) -> Result<Location, LocationServiceError> {
        let started_at = Instant::now();
        self.store_image(id, image)
            .map_err(|err| log_failure("location_set_image", started_at, err))
    }

    fn store_image(&self, id: LocationId, image: &str) -> Result<Location, LocationServiceError> {
        self.repo.set_location_image(id, image)?;
        info!("event=location_set_image module=service status=ok location_id={id}");
        self.repo
            .get_location(id)?
            .ok_or(LocationServiceError::InconsistentState(
                "location missing after image update",
            ))
    }
}

fn log_failure(
    event: &str,
    started_at: Instant,
    err: LocationServiceError,
) -> LocationServiceError {
    warn!(
        "event={event} module=service status=error error_code={} duration_ms={} error={}",
        err.code(),
        started_at.elapsed().as_millis(),
        err
    );
    err
}
