//! Structured report of everything the pipeline changed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Recorded change of a column's committed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtypeChange {
    /// Representation before the commit.
    pub from: String,
    /// Representation after the commit (`numeric` or `datetime`).
    pub to: String,
}

/// Outlier summary for one eligible numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    /// Values flagged as outliers.
    pub count: usize,
    /// Fraction of rows flagged, in `0..=1`.
    pub percent: f64,
}

/// Built fresh per call; every key is present on every call, zero-valued
/// when the corresponding stage is disabled, so callers can rely on key
/// presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanReport {
    /// `(rows, columns)` of the input table.
    pub original_shape: (usize, usize),
    /// Old name → new name for every column the normalizer changed.
    pub col_renames: IndexMap<String, String>,
    /// Rows removed by `null_handling = drop_rows`.
    pub nulls_dropped: usize,
    /// Cells filled per column; columns with no missing cells are omitted.
    pub nulls_filled: IndexMap<String, usize>,
    /// Rows removed because every cell was missing.
    pub blank_rows_dropped: usize,
    /// Columns removed because every cell was missing.
    pub blank_cols_dropped: usize,
    /// Rows removed as exact duplicates of an earlier row.
    pub duplicates_dropped: usize,
    /// Type commits made by the inferencer, keyed by column name.
    pub dtype_changes: IndexMap<String, DtypeChange>,
    /// Per-column outlier summaries, present even when zero.
    pub outliers: IndexMap<String, OutlierSummary>,
    /// Rows removed by `outlier_action = drop`.
    pub outliers_removed: usize,
    /// `(rows, columns)` of the cleaned table.
    pub cleaned_shape: (usize, usize),
    /// Total rows removed across all stages.
    pub rows_removed: usize,
    /// Total columns removed across all stages.
    pub cols_removed: usize,
}

impl CleanReport {
    /// Fresh report for a table of the given shape.
    pub(crate) fn new(original_shape: (usize, usize)) -> Self {
        Self {
            original_shape,
            col_renames: IndexMap::new(),
            nulls_dropped: 0,
            nulls_filled: IndexMap::new(),
            blank_rows_dropped: 0,
            blank_cols_dropped: 0,
            duplicates_dropped: 0,
            dtype_changes: IndexMap::new(),
            outliers: IndexMap::new(),
            outliers_removed: 0,
            cleaned_shape: original_shape,
            rows_removed: 0,
            cols_removed: 0,
        }
    }

    /// Record the final shape and the derived row/column deltas.
    pub(crate) fn finish(&mut self, cleaned_shape: (usize, usize)) {
        self.cleaned_shape = cleaned_shape;
        self.rows_removed = self.original_shape.0.saturating_sub(cleaned_shape.0);
        self.cols_removed = self.original_shape.1.saturating_sub(cleaned_shape.1);
    }
}
