//! Pipeline stages, applied in a fixed order by [`Scour`](crate::Scour).

pub mod dedup;
pub mod infer;
pub mod normalize;
pub mod nulls;
pub mod outliers;
pub mod prune;
pub mod trim;

/// Outcome of applying a stage to a single column, so "not applicable" is
/// distinguishable from "attempted and failed". A failure never crosses the
/// stage boundary; the column keeps its prior state.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOutcome {
    /// The stage changed this many cells (possibly zero).
    Applied { cells: usize },
    /// The column was not eligible for this stage.
    Skipped(SkipReason),
    /// The stage attempted the column and backed out.
    Failed(String),
}

/// Why a stage left a column alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The stage does not apply to this column's committed type.
    NotApplicable,
    /// The column has no missing cells to act on.
    NoMissing,
}
