//! Collection point (location) model and registration input.
//!
//! # Invariants
//! - A persisted location always has at least one accepted item category.
//! - `image` stays `None` only for rows written outside the registration path;
//!   registration stores [`PLACEHOLDER_IMAGE`] until an upload replaces it.
//! - Latitude is within `[-90, 90]`, longitude within `[-180, 180]`.

use crate::model::item::ItemId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Image filename written at registration time.
pub const PLACEHOLDER_IMAGE: &str = "fake-image.jpg";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Store-assigned identifier of a location.
pub type LocationId = i64;

/// Registered collection point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    /// State code qualifying `city`.
    pub uf: String,
    /// Filename reference of the location picture.
    pub image: Option<String>,
}

/// Location plus the titles of every category it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetail {
    pub location: Location,
    /// Category titles ordered by item id.
    pub items: Vec<String>,
}

/// Registration input for a new location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    /// Accepted categories. Duplicates are collapsed before persistence.
    pub item_ids: Vec<ItemId>,
}

/// Input rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationValidationError {
    #[error("field `{0}` cannot be blank")]
    BlankField(&'static str),
    #[error("invalid email address `{0}`")]
    InvalidEmail(String),
    #[error("{field} {value} is out of range")]
    CoordinateOutOfRange { field: &'static str, value: f64 },
    #[error("at least one item is required")]
    EmptyItems,
    #[error("invalid item id `{0}`")]
    InvalidItemId(String),
}

impl NewLocation {
    /// Checks the registration contract without touching storage.
    ///
    /// # Errors
    /// - `BlankField` for empty or whitespace-only text fields.
    /// - `InvalidEmail` when `email` is not shaped like an address.
    /// - `CoordinateOutOfRange` for non-finite or out-of-range coordinates.
    /// - `EmptyItems` when no category id is given.
    pub fn validate(&self) -> Result<(), LocationValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("whatsapp", &self.whatsapp),
            ("city", &self.city),
            ("uf", &self.uf),
        ] {
            if value.trim().is_empty() {
                return Err(LocationValidationError::BlankField(field));
            }
        }

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(LocationValidationError::InvalidEmail(self.email.clone()));
        }

        validate_coordinate("latitude", self.latitude, 90.0)?;
        validate_coordinate("longitude", self.longitude, 180.0)?;

        if self.item_ids.is_empty() {
            return Err(LocationValidationError::EmptyItems);
        }

        Ok(())
    }

    /// Returns the requested category ids, deduplicated and ascending.
    pub fn unique_item_ids(&self) -> Vec<ItemId> {
        self.item_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn validate_coordinate(
    field: &'static str,
    value: f64,
    bound: f64,
) -> Result<(), LocationValidationError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(LocationValidationError::CoordinateOutOfRange { field, value })
    }
}
