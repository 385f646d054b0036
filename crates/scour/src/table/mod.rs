//! Column-oriented table representation.

pub mod cell;
pub mod column;

pub use cell::Cell;
pub use column::{Column, ColumnData};

use crate::error::{Result, ScourError};

/// A column-oriented table: ordered columns, rows aligned by position. Row
/// identity is the position itself; there is no stable row key.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, validating at the entry boundary that every column has
    /// the same length and that names are unique. Name normalization may
    /// later introduce duplicate names; only the input is checked.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.data.len();
            for column in &columns {
                if column.data.len() != rows {
                    return Err(ScourError::Shape(format!(
                        "column '{}' has {} rows, expected {}",
                        column.name,
                        column.data.len(),
                        rows
                    )));
                }
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(ScourError::Shape(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Convenience constructor from `(name, cells)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Cell>)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, cells)| Column::new(name, cells))
                .collect(),
        )
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to all columns.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// True when every cell in the row is missing.
    pub fn row_is_blank(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c.data.is_null(row))
    }

    /// True when the row has at least one missing cell.
    pub fn row_has_null(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.data.is_null(row))
    }

    /// Drop the rows whose `keep` slot is false, in one pass over every
    /// column.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.row_count());
        for column in &mut self.columns {
            column.data.retain_rows(keep);
        }
    }

    /// Keep only the columns the predicate accepts.
    pub fn retain_columns<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&Column) -> bool,
    {
        self.columns.retain(|c| predicate(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Table::from_pairs([
            ("a", vec![Cell::from(1.0)]),
            ("b", vec![Cell::from(1.0), Cell::from(2.0)]),
        ]);
        assert!(matches!(result, Err(ScourError::Shape(_))));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Table::from_pairs([
            ("a", vec![Cell::from(1.0)]),
            ("a", vec![Cell::from(2.0)]),
        ]);
        assert!(matches!(result, Err(ScourError::Shape(_))));
    }

    #[test]
    fn test_empty_table_has_zero_shape() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.shape(), (0, 0));
    }

    #[test]
    fn test_blank_and_null_rows() {
        let table = Table::from_pairs([
            ("a", vec![Cell::Null, Cell::from(1.0), Cell::from(2.0)]),
            ("b", vec![Cell::Null, Cell::Null, Cell::from("x")]),
        ])
        .unwrap();

        assert!(table.row_is_blank(0));
        assert!(!table.row_is_blank(1));
        assert!(table.row_has_null(1));
        assert!(!table.row_has_null(2));
    }
}
