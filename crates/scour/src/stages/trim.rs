//! Whitespace trimming for textual columns.

use crate::table::{Cell, Column, ColumnData, Table};

use super::{ColumnOutcome, SkipReason};

/// Trim every eligible column in place.
pub fn apply(table: &mut Table) {
    for column in table.columns_mut() {
        let _ = trim_column(column);
    }
}

/// Trim one column. Columns already committed to a numeric or datetime
/// buffer are ineligible. Missing cells pass through untouched; non-text
/// cells in a mixed column are rendered to text first, so later type
/// inference re-parses the rendered form.
pub fn trim_column(column: &mut Column) -> ColumnOutcome {
    match &mut column.data {
        ColumnData::Number(_) | ColumnData::Timestamp(_) => {
            ColumnOutcome::Skipped(SkipReason::NotApplicable)
        }
        ColumnData::Text(values) => {
            let mut cells = 0;
            for value in values.iter_mut().flatten() {
                let trimmed = value.trim();
                if trimmed.len() != value.len() {
                    *value = trimmed.to_string();
                    cells += 1;
                }
            }
            ColumnOutcome::Applied { cells }
        }
        ColumnData::Mixed(mixed) => {
            let mut cells = 0;
            for cell in mixed.iter_mut() {
                let Some(text) = cell.to_text() else { continue };
                let replacement = Cell::Text(text.trim().to_string());
                if *cell != replacement {
                    *cell = replacement;
                    cells += 1;
                }
            }
            ColumnOutcome::Applied { cells }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_text_and_preserves_nulls() {
        let mut column = Column::new(
            "name",
            vec![Cell::from(" Alice "), Cell::Null, Cell::from("Bob")],
        );

        let outcome = trim_column(&mut column);

        assert_eq!(outcome, ColumnOutcome::Applied { cells: 1 });
        assert_eq!(column.data.get(0), Cell::from("Alice"));
        assert!(column.data.is_null(1));
        assert_eq!(column.data.get(2), Cell::from("Bob"));
    }

    #[test]
    fn test_mixed_cells_are_rendered_to_text() {
        let mut column = Column::new("v", vec![Cell::from(30.0), Cell::from(" 40 ")]);

        trim_column(&mut column);

        assert_eq!(column.data.get(0), Cell::from("30"));
        assert_eq!(column.data.get(1), Cell::from("40"));
    }

    #[test]
    fn test_committed_numeric_column_is_skipped() {
        let mut column = Column {
            name: "n".to_string(),
            data: ColumnData::Number(vec![Some(1.0), None]),
        };

        let outcome = trim_column(&mut column);

        assert_eq!(outcome, ColumnOutcome::Skipped(SkipReason::NotApplicable));
        assert_eq!(column.data, ColumnData::Number(vec![Some(1.0), None]));
    }
}
