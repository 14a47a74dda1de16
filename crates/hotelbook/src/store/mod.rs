//! Generic relational-table access: every domain service talks to its table through the same
//! `select` / `insert` / `update` / `delete` calls, narrowed with `eq`/`neq` filters and an
//! optional `order`.

mod memory;
pub mod query;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub use memory::InMemoryDatabase;
pub use query::{Filter, Order, Query};

/// A stored record as the backend sees it: a flat JSON object keyed by column name.
pub type Row = Map<String, Value>;

/// Tables known to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Hotels,
    Bookings,
    Ratings,
    Contacts,
}

impl Table {
    pub const fn all() -> [Self; 4] {
        [Self::Hotels, Self::Bookings, Self::Ratings, Self::Contacts]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hotels => "hotels",
            Self::Bookings => "bookings",
            Self::Ratings => "ratings",
            Self::Contacts => "contacts",
        }
    }
}

/// Error enumeration for backend failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("row encoding failed: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value.to_string())
    }
}

/// Storage abstraction so services can be exercised against any backend.
pub trait Database: Send + Sync {
    fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError>;

    /// Inserts a row and returns it as stored, including the generated `id`.
    fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError>;

    /// Merges `patch` into every row matching `query`; returns the number of rows touched.
    fn update(&self, table: Table, query: &Query, patch: Row) -> Result<usize, StoreError>;

    fn delete(&self, table: Table, query: &Query) -> Result<usize, StoreError>;

    fn count(&self, table: Table, query: &Query) -> Result<usize, StoreError> {
        Ok(self.select(table, query)?.len())
    }
}

/// Serializes a record into a row, rejecting anything that is not a JSON object.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(row) => Ok(row),
        other => Err(StoreError::Encoding(format!(
            "expected an object, found {other}"
        ))),
    }
}

pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

pub fn fetch_all<D: Database + ?Sized, T: DeserializeOwned>(
    db: &D,
    table: Table,
    query: &Query,
) -> Result<Vec<T>, StoreError> {
    db.select(table, query)?.into_iter().map(from_row).collect()
}

/// Returns the only row matching `query`. Zero or several matches are treated as not found.
pub fn fetch_single<D: Database + ?Sized, T: DeserializeOwned>(
    db: &D,
    table: Table,
    query: &Query,
) -> Result<T, StoreError> {
    let mut rows = db.select(table, query)?;
    if rows.len() != 1 {
        return Err(StoreError::NotFound);
    }
    rows.pop().map(from_row).unwrap_or(Err(StoreError::NotFound))
}

pub fn insert_as<D: Database + ?Sized, N: Serialize, T: DeserializeOwned>(
    db: &D,
    table: Table,
    record: &N,
) -> Result<T, StoreError> {
    let stored = db.insert(table, to_row(record)?)?;
    from_row(stored)
}
