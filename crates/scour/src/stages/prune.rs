//! Blank-row and blank-column pruning: two independent, fixed-order passes.

use crate::table::Table;

/// Drop rows where every cell is missing. Returns the count removed.
pub fn drop_blank_rows(table: &mut Table) -> usize {
    let keep: Vec<bool> = (0..table.row_count())
        .map(|row| !table.row_is_blank(row))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        table.retain_rows(&keep);
    }
    dropped
}

/// Drop columns where every cell is missing. Columns of a zero-row table
/// are kept. Returns the count removed.
pub fn drop_blank_columns(table: &mut Table) -> usize {
    let before = table.column_count();
    table.retain_columns(|column| {
        column.data.is_empty() || column.data.non_null_count() > 0
    });
    before - table.column_count()
}
