use std::cmp::Ordering;

use serde_json::Value;

use super::Row;

/// Column predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
}

impl Filter {
    fn matches(&self, row: &Row) -> bool {
        match self {
            Filter::Eq(column, expected) => row.get(column) == Some(expected),
            Filter::Neq(column, expected) => row.get(column) != Some(expected),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Builder mirroring the `select().eq().order().limit()` chain of a hosted table API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().eq("id", id.into())
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.into()));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq(column.into(), value.into()));
        self
    }

    pub fn order(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|filter| filter.matches(row))
    }

    /// Sorts (stable) and truncates an already-filtered result set.
    pub fn finish(&self, mut rows: Vec<Row>) -> Vec<Row> {
        if let Some((column, order)) = &self.order {
            rows.sort_by(|left, right| {
                let ordering = compare_values(left.get(column), right.get(column));
                match order {
                    Order::Ascending => ordering,
                    Order::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        rows
    }
}

/// Total order over optional JSON cells: missing/null < booleans < numbers < strings < others.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
        }
    }

    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn eq_and_neq_filters_combine() {
        let query = Query::new().eq("status", "unread").neq("id", "c-2");
        assert!(query.matches(&row(json!({ "id": "c-1", "status": "unread" }))));
        assert!(!query.matches(&row(json!({ "id": "c-2", "status": "unread" }))));
        assert!(!query.matches(&row(json!({ "id": "c-3", "status": "read" }))));
    }

    #[test]
    fn neq_matches_rows_missing_the_column() {
        let query = Query::new().neq("id", "00000000-0000-0000-0000-000000000000");
        assert!(query.matches(&row(json!({ "name": "no id yet" }))));
    }

    #[test]
    fn orders_timestamps_descending_and_limits() {
        let rows = vec![
            row(json!({ "id": "a", "createdAt": "2025-01-02T10:00:00Z" })),
            row(json!({ "id": "b", "createdAt": "2025-03-01T08:30:00Z" })),
            row(json!({ "id": "c", "createdAt": "2024-12-31T23:59:59Z" })),
        ];

        let ordered = Query::new()
            .order("createdAt", Order::Descending)
            .limit(2)
            .finish(rows);

        let ids: Vec<_> = ordered
            .iter()
            .map(|row| row["id"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn numbers_compare_numerically_and_nulls_sort_first() {
        assert_eq!(
            compare_values(Some(&json!(9)), Some(&json!(10.5))),
            Ordering::Less
        );
        assert_eq!(compare_values(None, Some(&json!(0))), Ordering::Less);
        assert_eq!(
            compare_values(Some(&Value::Null), None),
            Ordering::Equal
        );
    }
}
