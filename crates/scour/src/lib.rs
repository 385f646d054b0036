//! Scour: a configurable cleaning pipeline for tabular datasets.
//!
//! One call runs a fixed-order sequence of cleaning stages over an
//! in-memory table and returns the cleaned table plus a structured report
//! of what changed: name normalization, whitespace trimming, null handling,
//! blank-row/column pruning, duplicate removal, type inference, a
//! type-safety finalizer, and outlier detection.
//!
//! Parsing file formats and presenting results are the caller's concern;
//! the pipeline only ever sees a materialized [`Table`] and gives back a
//! new one. Row and column counts never increase, and per-column failures
//! never abort the run.
//!
//! # Example
//!
//! ```
//! use scour::{Cell, CleanConfig, Scour, Table};
//!
//! let table = Table::from_pairs([
//!     (" Name ", vec![Cell::from(" Alice "), Cell::Null]),
//!     ("Age", vec![Cell::from("30"), Cell::from(" 40 ")]),
//! ])
//! .unwrap();
//!
//! let config = CleanConfig {
//!     normalize_columns: true,
//!     trim_whitespace: true,
//!     infer_types: true,
//!     ..CleanConfig::default()
//! };
//!
//! let scour = Scour::with_config(config).unwrap();
//! let (cleaned, report) = scour.clean(table);
//!
//! assert!(cleaned.column("name").is_some());
//! assert!(cleaned.column("age").is_some());
//! assert_eq!(report.col_renames.len(), 2);
//! assert_eq!(report.dtype_changes["age"].to, "numeric");
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod stages;
pub mod table;

mod scour;

pub use crate::scour::Scour;
pub use config::{CleanConfig, FillStrategy, NullHandling, OutlierAction, OutlierMethod};
pub use error::{Result, ScourError};
pub use report::{CleanReport, DtypeChange, OutlierSummary};
pub use table::{Cell, Column, ColumnData, Table};
