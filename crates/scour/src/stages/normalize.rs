//! Column-name normalization.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Table;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_]+").unwrap());

/// Normalize one name: trim surrounding whitespace, collapse internal runs
/// to a single underscore, strip everything outside `[0-9a-zA-Z_]`,
/// lowercase.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let underscored = WHITESPACE_RUN.replace_all(trimmed, "_");
    let stripped = NON_IDENTIFIER.replace_all(&underscored, "");
    stripped.to_lowercase()
}

/// Rename every column to its normalized form, recording each changed
/// old → new pair. Names that normalize to the same string are left as
/// coexisting duplicate columns, never merged.
pub fn apply(table: &mut Table, renames: &mut IndexMap<String, String>) {
    for column in table.columns_mut() {
        let normalized = normalize_name(&column.name);
        if normalized != column.name {
            renames.insert(column.name.clone(), normalized.clone());
            column.name = normalized;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Table};

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(" Name "), "name");
        assert_eq!(normalize_name("Age!"), "age");
        assert_eq!(normalize_name("First  Name"), "first_name");
        assert_eq!(normalize_name("café au lait"), "caf_au_lait");
        assert_eq!(normalize_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_apply_records_only_changed_names() {
        let mut table = Table::from_pairs([
            (" Name ", vec![Cell::Null]),
            ("age", vec![Cell::Null]),
        ])
        .unwrap();
        let mut renames = IndexMap::new();

        apply(&mut table, &mut renames);

        assert_eq!(table.columns()[0].name, "name");
        assert_eq!(table.columns()[1].name, "age");
        assert_eq!(renames.len(), 1);
        assert_eq!(renames.get(" Name "), Some(&"name".to_string()));
    }

    #[test]
    fn test_colliding_names_coexist() {
        let mut table = Table::from_pairs([
            ("Value!", vec![Cell::from(1.0)]),
            ("value?", vec![Cell::from(2.0)]),
        ])
        .unwrap();
        let mut renames = IndexMap::new();

        apply(&mut table, &mut renames);

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns()[0].name, "value");
        assert_eq!(table.columns()[1].name, "value");
    }
}
