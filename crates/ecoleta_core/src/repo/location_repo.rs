//! Location repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve location searches (city/uf/item-set predicate) with one join.
//! - Persist a location and its item links as a single unit of work.
//! - Load location detail together with accepted category titles.
//!
//! # Invariants
//! - A location row is never committed without its full, valid link set.
//! - Every requested item id is checked in one read before the first write;
//!   any unknown id aborts the transaction and nothing is persisted.
//! - Filtered search results are distinct by location id.
//! - City and uf are compared verbatim (case-sensitive, no trimming).

use crate::model::filter::LocationFilter;
use crate::model::item::ItemId;
use crate::model::location::{
    Location, LocationId, LocationValidationError, NewLocation, PLACEHOLDER_IMAGE,
};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::item_repo::{encode_id_set, missing_item_ids, ITEM_TABLES};
use crate::repo::schema::{ensure_connection_ready, TableRequirement};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

const LOCATION_TABLES: &[TableRequirement] = &[
    (
        "locations",
        &[
            "id", "image", "name", "email", "whatsapp", "latitude", "longitude", "city", "uf",
        ],
    ),
    ("location_items", &["location_id", "item_id"]),
];

const LOCATION_SELECT_SQL: &str = "SELECT
    locations.id AS id,
    locations.name AS name,
    locations.email AS email,
    locations.whatsapp AS whatsapp,
    locations.latitude AS latitude,
    locations.longitude AS longitude,
    locations.city AS city,
    locations.uf AS uf,
    locations.image AS image
FROM locations";

/// Repository interface for location search, detail and registration.
pub trait LocationRepository {
    /// Resolves `filter` into the matching locations ordered by id.
    fn search_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>>;
    /// Gets one location by id.
    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>>;
    /// Returns titles of every category linked to `id`, ordered by item id.
    fn list_location_item_titles(&self, id: LocationId) -> RepoResult<Vec<String>>;
    /// Creates a location and all of its item links in one transaction.
    fn register_location(&mut self, input: &NewLocation) -> RepoResult<Location>;
    /// Records an already-stored image filename for an existing location.
    fn set_location_image(&self, id: LocationId, image: &str) -> RepoResult<()>;
}

/// SQLite-backed location repository.
pub struct SqliteLocationRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteLocationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, ITEM_TABLES)?;
        ensure_connection_ready(conn, LOCATION_TABLES)?;
        Ok(Self { conn })
    }
}

impl LocationRepository for SqliteLocationRepository<'_> {
    fn search_locations(&self, filter: &LocationFilter) -> RepoResult<Vec<Location>> {
        let (sql, bind_values) = match filter {
            LocationFilter::Unfiltered => {
                (format!("{LOCATION_SELECT_SQL} ORDER BY id ASC;"), Vec::new())
            }
            LocationFilter::Filtered {
                city,
                uf,
                item_ids,
            } => {
                if item_ids.is_empty() {
                    return Ok(Vec::new());
                }

                let sql = format!(
                    "SELECT DISTINCT * FROM (
                        {LOCATION_SELECT_SQL}
                        INNER JOIN location_items
                            ON location_items.location_id = locations.id
                        WHERE locations.city = ?1
                          AND locations.uf = ?2
                          AND location_items.item_id IN (SELECT value FROM json_each(?3))
                     )
                     ORDER BY id ASC;"
                );
                let bind_values = vec![
                    Value::Text(city.clone()),
                    Value::Text(uf.clone()),
                    Value::Text(encode_id_set(item_ids)?),
                ];
                (sql, bind_values)
            }
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(parse_location_row(row)?);
        }
        Ok(locations)
    }

    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        let location = self
            .conn
            .query_row(
                &format!("{LOCATION_SELECT_SQL} WHERE locations.id = ?1;"),
                [id],
                parse_location_row_sqlite,
            )
            .optional()?;
        Ok(location)
    }

    fn list_location_item_titles(&self, id: LocationId) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT items.id, items.title
             FROM items
             INNER JOIN location_items ON location_items.item_id = items.id
             WHERE location_items.location_id = ?1
             ORDER BY items.id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut titles = Vec::new();
        while let Some(row) = rows.next()? {
            titles.push(row.get("title")?);
        }
        Ok(titles)
    }

    fn register_location(&mut self, input: &NewLocation) -> RepoResult<Location> {
        input.validate()?;
        let item_ids = input.unique_item_ids();

        // Dropping `tx` on any early return rolls the whole unit back.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let missing = missing_item_ids(&tx, &input.item_ids)?;
        if let Some(&offending) = missing.first() {
            return Err(RepoError::ItemNotFound(offending));
        }

        tx.execute(
            "INSERT INTO locations (
                image,
                name,
                email,
                whatsapp,
                latitude,
                longitude,
                city,
                uf
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                PLACEHOLDER_IMAGE,
                input.name.as_str(),
                input.email.as_str(),
                input.whatsapp.as_str(),
                input.latitude,
                input.longitude,
                input.city.as_str(),
                input.uf.as_str(),
            ],
        )?;
        let location_id = tx.last_insert_rowid();

        insert_location_items(&tx, location_id, &item_ids)?;
        tx.commit()?;

        Ok(Location {
            id: location_id,
            name: input.name.clone(),
            email: input.email.clone(),
            whatsapp: input.whatsapp.clone(),
            latitude: input.latitude,
            longitude: input.longitude,
            city: input.city.clone(),
            uf: input.uf.clone(),
            image: Some(PLACEHOLDER_IMAGE.to_string()),
        })
    }

    fn set_location_image(&self, id: LocationId, image: &str) -> RepoResult<()> {
        if image.trim().is_empty() {
            return Err(LocationValidationError::BlankField("image").into());
        }

        let changed = self.conn.execute(
            "UPDATE locations SET image = ?2 WHERE id = ?1;",
            params![id, image],
        )?;

        if changed == 0 {
            return Err(RepoError::LocationNotFound(id));
        }

        Ok(())
    }
}

/// Writes all `(location_id, item_id)` links with one batched insert.
fn insert_location_items(
    tx: &Transaction<'_>,
    location_id: LocationId,
    item_ids: &[ItemId],
) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO location_items (location_id, item_id)
         SELECT ?1, value FROM json_each(?2);",
        params![location_id, encode_id_set(item_ids)?],
    )?;
    Ok(())
}

fn parse_location_row(row: &Row<'_>) -> RepoResult<Location> {
    Ok(parse_location_row_sqlite(row)?)
}

fn parse_location_row_sqlite(row: &Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        whatsapp: row.get("whatsapp")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        city: row.get("city")?,
        uf: row.get("uf")?,
        image: row.get("image")?,
    })
}
