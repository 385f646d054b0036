//! Duplicate-row removal, keeping the first occurrence.

use std::collections::HashSet;

use crate::table::Table;

/// Remove rows that exactly duplicate an earlier row across all columns.
/// Order-preserving; missing cells compare equal to each other. Returns the
/// count removed.
pub fn apply(table: &mut Table) -> usize {
    let rows = table.row_count();
    let mut seen = HashSet::with_capacity(rows);
    let mut keep = Vec::with_capacity(rows);

    for row in 0..rows {
        let key: Vec<_> = table
            .columns()
            .iter()
            .map(|column| column.data.get(row).key())
            .collect();
        keep.push(seen.insert(key));
    }

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        table.retain_rows(&keep);
    }
    dropped
}
