//! Column storage: tagged cells narrowing to typed buffers.

use chrono::NaiveDateTime;

use super::cell::Cell;

/// Storage for one column. A column starts `Mixed` (one tagged value per
/// cell) and is narrowed to a concrete buffer once a pipeline stage commits
/// a type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Heterogeneous cells, no committed type yet.
    Mixed(Vec<Cell>),
    /// Committed numeric column.
    Number(Vec<Option<f64>>),
    /// Committed date/time column.
    Timestamp(Vec<Option<NaiveDateTime>>),
    /// Committed textual column.
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Mixed(v) => v.len(),
            ColumnData::Number(v) => v.len(),
            ColumnData::Timestamp(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    /// True when the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at `row`, materialized as a tagged value. Out-of-range rows
    /// read as missing.
    pub fn get(&self, row: usize) -> Cell {
        match self {
            ColumnData::Mixed(v) => v.get(row).cloned().unwrap_or(Cell::Null),
            ColumnData::Number(v) => match v.get(row).copied().flatten() {
                Some(n) => Cell::Number(n),
                None => Cell::Null,
            },
            ColumnData::Timestamp(v) => match v.get(row).copied().flatten() {
                Some(t) => Cell::Timestamp(t),
                None => Cell::Null,
            },
            ColumnData::Text(v) => match v.get(row).cloned().flatten() {
                Some(s) => Cell::Text(s),
                None => Cell::Null,
            },
        }
    }

    /// True when the cell at `row` is missing.
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            ColumnData::Mixed(v) => v.get(row).map(Cell::is_null).unwrap_or(true),
            ColumnData::Number(v) => v.get(row).copied().flatten().is_none(),
            ColumnData::Timestamp(v) => v.get(row).copied().flatten().is_none(),
            ColumnData::Text(v) => v.get(row).map(Option::is_none).unwrap_or(true),
        }
    }

    /// Count of missing cells.
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_null(row)).count()
    }

    /// Count of non-missing cells.
    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Short name of the committed representation.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnData::Mixed(_) => "mixed",
            ColumnData::Number(_) => "numeric",
            ColumnData::Timestamp(_) => "datetime",
            ColumnData::Text(_) => "text",
        }
    }

    /// Give up the committed representation and go back to tagged cells.
    pub fn widen_to_mixed(&mut self) {
        if matches!(self, ColumnData::Mixed(_)) {
            return;
        }
        let cells: Vec<Cell> = (0..self.len()).map(|row| self.get(row)).collect();
        *self = ColumnData::Mixed(cells);
    }

    /// Drop the rows whose `keep` slot is false.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        fn retain<T>(values: &mut Vec<T>, keep: &[bool]) {
            let mut slots = keep.iter().copied();
            values.retain(|_| slots.next().unwrap_or(true));
        }
        match self {
            ColumnData::Mixed(v) => retain(v, keep),
            ColumnData::Number(v) => retain(v, keep),
            ColumnData::Timestamp(v) => retain(v, keep),
            ColumnData::Text(v) => retain(v, keep),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name; normalized in place by the pipeline when enabled.
    pub name: String,
    /// Cell storage.
    pub data: ColumnData,
}

impl Column {
    /// Create a column from tagged cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Mixed(cells),
        }
    }

    /// Replace missing cells with `value`, widening back to `Mixed` when the
    /// value cannot live in the committed buffer. A textual value that parses
    /// as a number fills a committed numeric column without widening.
    /// Returns the number of cells filled.
    pub fn fill_nulls(&mut self, value: &Cell) -> usize {
        let fits = match (&self.data, value) {
            (ColumnData::Mixed(_), _) => true,
            (ColumnData::Number(_), v) => coerce_number(v).is_some(),
            (ColumnData::Timestamp(_), Cell::Timestamp(_)) => true,
            (ColumnData::Text(_), Cell::Text(_)) => true,
            _ => false,
        };
        if !fits {
            self.data.widen_to_mixed();
        }

        match &mut self.data {
            ColumnData::Mixed(cells) => {
                let mut filled = 0;
                for cell in cells.iter_mut() {
                    if cell.is_null() {
                        *cell = value.clone();
                        filled += 1;
                    }
                }
                filled
            }
            ColumnData::Number(values) => {
                let Some(n) = coerce_number(value) else { return 0 };
                fill_options(values, n)
            }
            ColumnData::Timestamp(values) => {
                let Cell::Timestamp(t) = value else { return 0 };
                fill_options(values, *t)
            }
            ColumnData::Text(values) => {
                let Cell::Text(s) = value else { return 0 };
                fill_options(values, s.clone())
            }
        }
    }
}

/// A fill value acceptable to a numeric buffer.
fn coerce_number(value: &Cell) -> Option<f64> {
    match value {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        _ => None,
    }
}

fn fill_options<T: Clone>(values: &mut [Option<T>], value: T) -> usize {
    let mut filled = 0;
    for slot in values.iter_mut() {
        if slot.is_none() {
            *slot = Some(value.clone());
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_nulls_in_mixed_column() {
        let mut column = Column::new("x", vec![Cell::from("a"), Cell::Null, Cell::from("b")]);
        let filled = column.fill_nulls(&Cell::from("z"));
        assert_eq!(filled, 1);
        assert_eq!(column.data.get(1), Cell::from("z"));
    }

    #[test]
    fn test_fill_numeric_buffer_with_parsable_text() {
        let mut column = Column {
            name: "n".to_string(),
            data: ColumnData::Number(vec![Some(1.0), None]),
        };
        let filled = column.fill_nulls(&Cell::from("2.5"));
        assert_eq!(filled, 1);
        assert_eq!(column.data, ColumnData::Number(vec![Some(1.0), Some(2.5)]));
    }

    #[test]
    fn test_fill_numeric_buffer_widens_on_text() {
        let mut column = Column {
            name: "n".to_string(),
            data: ColumnData::Number(vec![Some(1.0), None]),
        };
        let filled = column.fill_nulls(&Cell::from("n/a"));
        assert_eq!(filled, 1);
        assert_eq!(
            column.data,
            ColumnData::Mixed(vec![Cell::Number(1.0), Cell::from("n/a")])
        );
    }

    #[test]
    fn test_retain_rows() {
        let mut data = ColumnData::Number(vec![Some(1.0), Some(2.0), Some(3.0)]);
        data.retain_rows(&[true, false, true]);
        assert_eq!(data, ColumnData::Number(vec![Some(1.0), Some(3.0)]));
    }

    #[test]
    fn test_widen_to_mixed_preserves_nulls() {
        let mut data = ColumnData::Text(vec![Some("a".to_string()), None]);
        data.widen_to_mixed();
        assert_eq!(data, ColumnData::Mixed(vec![Cell::from("a"), Cell::Null]));
    }
}
