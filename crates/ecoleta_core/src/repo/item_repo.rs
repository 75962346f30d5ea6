//! Item category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Serve the pre-seeded category catalog.
//! - Own the existence check that decides which item ids are valid.
//!
//! # Invariants
//! - Categories are read-only; no write path exists here.
//! - Catalog listing is ordered by `id ASC`.

use crate::model::item::{ItemCategory, ItemId};
use crate::repo::error::RepoResult;
use crate::repo::schema::{ensure_connection_ready, TableRequirement};
use rusqlite::Connection;
use std::collections::BTreeSet;

pub(crate) const ITEM_TABLES: &[TableRequirement] = &[("items", &["id", "title", "image"])];

/// Repository interface for the category catalog.
pub trait ItemRepository {
    /// Returns every category ordered by id.
    fn list_items(&self) -> RepoResult<Vec<ItemCategory>>;
    /// Returns the ids from `ids` that do not resolve to a category.
    fn find_missing_items(&self, ids: &[ItemId]) -> RepoResult<Vec<ItemId>>;
}

/// SQLite-backed category catalog.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, ITEM_TABLES)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn list_items(&self) -> RepoResult<Vec<ItemCategory>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, image FROM items ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(ItemCategory {
                id: row.get("id")?,
                title: row.get("title")?,
                image: row.get("image")?,
            });
        }
        Ok(items)
    }

    fn find_missing_items(&self, ids: &[ItemId]) -> RepoResult<Vec<ItemId>> {
        missing_item_ids(self.conn, ids)
    }
}

/// Resolves all `ids` in one read and returns the unknown ones in input order.
///
/// Accepts a plain connection or an open transaction, so the registration
/// path can run the check inside its own unit of work. The id set is bound as
/// a single JSON parameter, so its size is not capped by SQLite's variable
/// limit.
pub(crate) fn missing_item_ids(conn: &Connection, ids: &[ItemId]) -> RepoResult<Vec<ItemId>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT id
         FROM items
         WHERE id IN (SELECT value FROM json_each(?1));",
    )?;
    let mut rows = stmt.query([encode_id_set(ids)?])?;
    let mut found = BTreeSet::new();
    while let Some(row) = rows.next()? {
        found.insert(row.get::<_, ItemId>(0)?);
    }

    Ok(ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect())
}

/// Encodes ids as a JSON array for `json_each(?)` bindings.
pub(crate) fn encode_id_set<'a>(ids: impl IntoIterator<Item = &'a ItemId>) -> RepoResult<String> {
    let ids: Vec<ItemId> = ids.into_iter().copied().collect();
    Ok(serde_json::to_string(&ids)?)
}
