//! Recyclable-material categories.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an item category.
pub type ItemId = i64;

/// Pre-seeded reference data; never created or mutated by core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCategory {
    pub id: ItemId,
    /// Display title, e.g. `Pilhas e Baterias`.
    pub title: String,
    /// Icon filename shipped with the client.
    pub image: String,
}
