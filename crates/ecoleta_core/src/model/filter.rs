//! Location search filter.

use crate::model::item::ItemId;
use crate::model::location::LocationValidationError;
use std::collections::BTreeSet;

/// Search predicate for locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationFilter {
    /// Browse all locations.
    Unfiltered,
    /// Locations in `city`/`uf` accepting at least one of `item_ids`.
    Filtered {
        city: String,
        uf: String,
        item_ids: BTreeSet<ItemId>,
    },
}

impl LocationFilter {
    /// Builds a filter from optional query parts.
    ///
    /// Falls back to `Unfiltered` when any part is missing or empty. City and
    /// state are kept verbatim, whitespace included: matching is exact and
    /// case-sensitive.
    pub fn from_parts(
        city: Option<String>,
        uf: Option<String>,
        item_ids: Option<BTreeSet<ItemId>>,
    ) -> Self {
        match (city, uf, item_ids) {
            (Some(city), Some(uf), Some(item_ids))
                if !city.is_empty() && !uf.is_empty() && !item_ids.is_empty() =>
            {
                Self::Filtered { city, uf, item_ids }
            }
            _ => Self::Unfiltered,
        }
    }
}

/// Parses the comma-separated item list used by query strings (`"1, 2,3"`).
///
/// Empty tokens are skipped; any other non-integer token is rejected.
pub fn parse_item_ids(raw: &str) -> Result<BTreeSet<ItemId>, LocationValidationError> {
    let mut ids = BTreeSet::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let id = token
            .parse::<ItemId>()
            .map_err(|_| LocationValidationError::InvalidItemId(token.to_string()))?;
        ids.insert(id);
    }
    Ok(ids)
}
