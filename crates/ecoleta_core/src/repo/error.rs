use crate::db::DbError;
use crate::model::item::ItemId;
use crate::model::location::{LocationId, LocationValidationError};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for location/item persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    #[error(transparent)]
    Db(#[from] DbError),
    /// Input rejected before storage access.
    #[error(transparent)]
    Validation(#[from] LocationValidationError),
    /// Query parameters could not be encoded for binding.
    #[error("failed to encode query parameters: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    /// Connection schema is not at the expected migrated version.
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
