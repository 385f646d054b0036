//! Null handling: drop rows with any missing cell, or fill per strategy.

use indexmap::IndexMap;

use crate::config::{CleanConfig, FillStrategy, NullHandling};
use crate::table::cell::CellKey;
use crate::table::{Cell, Column, ColumnData, Table};

use super::{ColumnOutcome, SkipReason};

/// Apply the configured null-handling mode. Returns the rows dropped;
/// per-column fill counts are recorded into `filled`.
pub fn apply(
    table: &mut Table,
    config: &CleanConfig,
    filled: &mut IndexMap<String, usize>,
) -> usize {
    match config.null_handling {
        NullHandling::None => 0,
        NullHandling::DropRows => drop_null_rows(table),
        NullHandling::Fill => {
            let strategy = config.effective_fill_strategy();
            let constant = config.fill_constant.as_deref();
            for column in table.columns_mut() {
                if let ColumnOutcome::Applied { cells } = fill_column(column, strategy, constant) {
                    if cells > 0 {
                        filled.insert(column.name.clone(), cells);
                    }
                }
            }
            0
        }
    }
}

/// Remove every row with at least one missing cell in any column.
fn drop_null_rows(table: &mut Table) -> usize {
    let keep: Vec<bool> = (0..table.row_count())
        .map(|row| !table.row_has_null(row))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        table.retain_rows(&keep);
    }
    dropped
}

/// Fill one column's missing cells. A column that cannot satisfy the
/// strategy keeps its missing values and is not reported as filled.
pub fn fill_column(
    column: &mut Column,
    strategy: FillStrategy,
    constant: Option<&str>,
) -> ColumnOutcome {
    if column.data.null_count() == 0 {
        return ColumnOutcome::Skipped(SkipReason::NoMissing);
    }

    let fill = match strategy {
        FillStrategy::Mean => match numeric_values(column) {
            Some(values) => Cell::Number(values.iter().sum::<f64>() / values.len() as f64),
            None => return ColumnOutcome::Skipped(SkipReason::NotApplicable),
        },
        FillStrategy::Median => match numeric_values(column) {
            Some(values) => Cell::Number(median(values)),
            None => return ColumnOutcome::Skipped(SkipReason::NotApplicable),
        },
        FillStrategy::Mode => match mode_fill(column) {
            Some(cell) => cell,
            None => {
                return ColumnOutcome::Failed("no values to derive a fill from".to_string());
            }
        },
        FillStrategy::Constant => match constant {
            Some(text) => Cell::Text(text.to_string()),
            None => {
                return ColumnOutcome::Failed(
                    "fill_strategy 'constant' without fill_constant".to_string(),
                );
            }
        },
    };

    let cells = column.fill_nulls(&fill);
    ColumnOutcome::Applied { cells }
}

/// Non-missing values of a numeric column. `None` for non-numeric columns:
/// a mixed column counts as numeric only when every non-missing cell is a
/// number and at least one exists.
fn numeric_values(column: &Column) -> Option<Vec<f64>> {
    match &column.data {
        ColumnData::Number(values) => {
            let values: Vec<f64> = values.iter().flatten().copied().collect();
            (!values.is_empty()).then_some(values)
        }
        ColumnData::Mixed(cells) => {
            let mut values = Vec::new();
            for cell in cells {
                match cell {
                    Cell::Null => {}
                    Cell::Number(n) => values.push(*n),
                    _ => return None,
                }
            }
            (!values.is_empty()).then_some(values)
        }
        _ => None,
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Most frequent non-missing value, first encountered on ties. With no
/// non-missing value at all, falls back to empty text for textual columns
/// and zero for numeric ones; a datetime column has no sensible fallback.
fn mode_fill(column: &Column) -> Option<Cell> {
    let mut counts: IndexMap<CellKey, (Cell, usize)> = IndexMap::new();
    for row in 0..column.data.len() {
        let cell = column.data.get(row);
        if cell.is_null() {
            continue;
        }
        counts.entry(cell.key()).or_insert_with(|| (cell, 0)).1 += 1;
    }

    let mut best: Option<(Cell, usize)> = None;
    for (_, (cell, count)) in counts {
        match &best {
            Some((_, top)) if *top >= count => {}
            _ => best = Some((cell, count)),
        }
    }

    match best {
        Some((cell, _)) => Some(cell),
        None => match column.data {
            ColumnData::Number(_) => Some(Cell::Number(0.0)),
            ColumnData::Timestamp(_) => None,
            ColumnData::Mixed(_) | ColumnData::Text(_) => Some(Cell::Text(String::new())),
        },
    }
}
