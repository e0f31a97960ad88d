//! Schema diff between two column-type maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column-level differences between a baseline schema and a current schema.
/// `modified` entries are formatted as `"col: old_type -> new_type"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Set-difference the two schemas. Output order is the sorted column order,
/// so diffs are deterministic.
pub fn schema_diff(
    baseline: &BTreeMap<String, String>,
    current: &BTreeMap<String, String>,
) -> SchemaDiff {
    let added = current
        .keys()
        .filter(|col| !baseline.contains_key(*col))
        .cloned()
        .collect();

    let removed = baseline
        .keys()
        .filter(|col| !current.contains_key(*col))
        .cloned()
        .collect();

    let modified = baseline
        .iter()
        .filter_map(|(col, old_type)| {
            let new_type = current.get(col)?;
            if new_type != old_type {
                Some(format!("{}: {} -> {}", col, old_type, new_type))
            } else {
                None
            }
        })
        .collect();

    SchemaDiff {
        added,
        removed,
        modified,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_identical_schemas() {
        let s = schema(&[("id", "int"), ("amount", "float")]);
        let diff = schema_diff(&s, &s);
        assert!(diff.is_empty());
        assert_eq!(diff, SchemaDiff::default());
    }

    #[test]
    fn test_added_and_removed() {
        let baseline = schema(&[("id", "int"), ("amount", "float")]);
        let current = schema(&[("id", "int"), ("status", "string")]);

        let diff = schema_diff(&baseline, &current);
        assert_eq!(diff.added, vec!["status"]);
        assert_eq!(diff.removed, vec!["amount"]);
        assert!(diff.modified.is_empty());
    }

    #[test]
    fn test_modified_format() {
        let baseline = schema(&[("amount", "int")]);
        let current = schema(&[("amount", "float")]);

        let diff = schema_diff(&baseline, &current);
        assert_eq!(diff.modified, vec!["amount: int -> float"]);
    }

    #[test]
    fn test_anti_symmetry_of_added_removed() {
        let a = schema(&[("id", "int"), ("amount", "float"), ("ts", "timestamp")]);
        let b = schema(&[("id", "int"), ("status", "string")]);

        let forward = schema_diff(&a, &b);
        let backward = schema_diff(&b, &a);
        assert_eq!(forward.added, backward.removed);
        assert_eq!(forward.removed, backward.added);
    }
}
