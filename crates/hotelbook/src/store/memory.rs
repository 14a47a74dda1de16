use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use uuid::Uuid;

use super::{Database, Query, Row, StoreError, Table};

/// Process-local backend. Rows keep insertion order, which is what an unordered `select` returns.
#[derive(Default, Clone)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<HashMap<Table, Vec<Row>>>>,
}

impl InMemoryDatabase {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Table, Vec<Row>>>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("table mutex poisoned".to_string()))
    }
}

impl Database for InMemoryDatabase {
    fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        let guard = self.lock()?;
        let rows = guard
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(query.finish(rows))
    }

    fn insert(&self, table: Table, mut row: Row) -> Result<Row, StoreError> {
        let id = match row.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => Uuid::new_v4().to_string(),
            Some(other) => {
                return Err(StoreError::Encoding(format!(
                    "id must be a string, found {other}"
                )))
            }
        };
        row.insert("id".to_string(), Value::String(id.clone()));

        let mut guard = self.lock()?;
        let rows = guard.entry(table).or_default();
        let duplicate = rows
            .iter()
            .any(|existing| existing.get("id").and_then(Value::as_str) == Some(id.as_str()));
        if duplicate {
            return Err(StoreError::Conflict);
        }
        rows.push(row.clone());
        Ok(row)
    }

    fn update(&self, table: Table, query: &Query, mut patch: Row) -> Result<usize, StoreError> {
        patch.remove("id");

        let mut guard = self.lock()?;
        let Some(rows) = guard.get_mut(&table) else {
            return Ok(0);
        };

        let mut touched = 0;
        for row in rows.iter_mut().filter(|row| query.matches(row)) {
            for (column, value) in &patch {
                row.insert(column.clone(), value.clone());
            }
            touched += 1;
        }
        Ok(touched)
    }

    fn delete(&self, table: Table, query: &Query) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        let Some(rows) = guard.get_mut(&table) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|row| !query.matches(row));
        Ok(before - rows.len())
    }
}
