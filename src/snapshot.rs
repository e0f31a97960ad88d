//! Dataset snapshots
//!
//! A snapshot is a bounded rectangular sample of a table at a point in time:
//! ordered column names, per-column declared types, and row values. Snapshots
//! are never mutated once fetched; two snapshots (baseline, current) are
//! always compared pairwise.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::MAX_SAMPLE_ROWS;

/// Identifies the monitored table, optionally qualified by database and schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub table: String,
    pub database: Option<String>,
    pub schema: Option<String>,
}

impl TableRef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            database: None,
            schema: None,
        }
    }

    pub fn qualified(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            database: Some(database.into()),
            schema: Some(schema.into()),
        }
    }

    /// Fully qualified name, `database.schema.table` with absent parts omitted.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(db) = &self.database {
            parts.push(db);
        }
        if let Some(schema) = &self.schema {
            parts.push(schema);
        }
        parts.push(&self.table);
        parts.join(".")
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// A column name together with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A bounded tabular sample of a table.
///
/// Rows beyond [`MAX_SAMPLE_ROWS`] are dropped at construction; row cells are
/// positional and parallel to `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Value>>,
}

impl DatasetSnapshot {
    pub fn new(columns: Vec<ColumnDef>, mut rows: Vec<Vec<Value>>) -> Self {
        rows.truncate(MAX_SAMPLE_ROWS);
        Self { columns, rows }
    }

    /// Snapshot with columns but no rows (e.g. an empty table).
    pub fn empty(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column-name -> declared-type map, ordered for deterministic diffs.
    pub fn schema_map(&self) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.data_type.clone()))
            .collect()
    }

    /// Value frequency table for one column, values rendered as strings.
    /// Nulls are skipped. `None` when the column does not exist.
    pub fn value_distribution(&self, column: &str) -> Option<HashMap<String, u64>> {
        let idx = self.column_index(column)?;
        let mut counts: HashMap<String, u64> = HashMap::new();
        for row in &self.rows {
            match row.get(idx) {
                Some(Value::Null) | None => continue,
                Some(Value::String(s)) => *counts.entry(s.clone()).or_insert(0) += 1,
                Some(v) => *counts.entry(v.to_string()).or_insert(0) += 1,
            }
        }
        Some(counts)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DatasetSnapshot {
        DatasetSnapshot::new(
            vec![
                ColumnDef::new("id", "int"),
                ColumnDef::new("status", "string"),
            ],
            vec![
                vec![json!(1), json!("pending")],
                vec![json!(2), json!("completed")],
                vec![json!(3), json!("pending")],
                vec![json!(4), Value::Null],
            ],
        )
    }

    #[test]
    fn test_row_count_and_schema() {
        let snap = sample();
        assert_eq!(snap.row_count(), 4);
        assert!(!snap.is_empty());

        let schema = snap.schema_map();
        assert_eq!(schema.get("id"), Some(&"int".to_string()));
        assert_eq!(schema.get("status"), Some(&"string".to_string()));
    }

    #[test]
    fn test_value_distribution_skips_nulls() {
        let snap = sample();
        let dist = snap.value_distribution("status").unwrap();
        assert_eq!(dist.get("pending"), Some(&2));
        assert_eq!(dist.get("completed"), Some(&1));
        assert_eq!(dist.values().sum::<u64>(), 3); // null row excluded
    }

    #[test]
    fn test_value_distribution_missing_column() {
        assert!(sample().value_distribution("nope").is_none());
    }

    #[test]
    fn test_numeric_values_rendered_as_strings() {
        let snap = sample();
        let dist = snap.value_distribution("id").unwrap();
        assert_eq!(dist.get("1"), Some(&1));
        assert_eq!(dist.len(), 4);
    }

    #[test]
    fn test_sample_cap_enforced() {
        let rows = vec![vec![json!(1)]; MAX_SAMPLE_ROWS + 500];
        let snap = DatasetSnapshot::new(vec![ColumnDef::new("id", "int")], rows);
        assert_eq!(snap.row_count(), MAX_SAMPLE_ROWS);
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(TableRef::new("ORDERS").qualified_name(), "ORDERS");
        assert_eq!(
            TableRef::qualified("ANALYTICS", "PUBLIC", "ORDERS").qualified_name(),
            "ANALYTICS.PUBLIC.ORDERS"
        );
    }
}
