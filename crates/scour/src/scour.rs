//! Pipeline orchestrator and public entry point.

use crate::config::{CleanConfig, NullHandling};
use crate::error::Result;
use crate::report::CleanReport;
use crate::stages;
use crate::table::Table;

/// The cleaning pipeline. Holds a validated configuration; each `clean`
/// call runs the fixed-order stages over one table and builds a fresh
/// report. No state persists between calls, so one instance can serve
/// concurrent callers working on distinct tables.
#[derive(Debug, Clone, Default)]
pub struct Scour {
    config: CleanConfig,
}

impl Scour {
    /// All-defaults pipeline: every optional stage off, only the
    /// type-safety finalizer active.
    pub fn new() -> Self {
        Self {
            config: CleanConfig::default(),
        }
    }

    /// Build a pipeline from a configuration, validating it once so the
    /// stages never have to.
    pub fn with_config(config: CleanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Run the pipeline over a table. The order is load-bearing: trimming
    /// precedes type inference, null handling precedes blank-pruning and
    /// dedup, inference precedes outlier detection, and the finalizer runs
    /// just before the detector so committed numeric columns exist for it.
    pub fn clean(&self, mut table: Table) -> (Table, CleanReport) {
        let config = &self.config;
        let mut report = CleanReport::new(table.shape());

        if config.normalize_columns {
            stages::normalize::apply(&mut table, &mut report.col_renames);
        }
        if config.trim_whitespace {
            stages::trim::apply(&mut table);
        }
        if config.null_handling != NullHandling::None {
            report.nulls_dropped =
                stages::nulls::apply(&mut table, config, &mut report.nulls_filled);
        }
        if config.drop_blank_rows {
            report.blank_rows_dropped = stages::prune::drop_blank_rows(&mut table);
        }
        if config.drop_blank_cols {
            report.blank_cols_dropped = stages::prune::drop_blank_columns(&mut table);
        }
        if config.drop_duplicates {
            report.duplicates_dropped = stages::dedup::apply(&mut table);
        }
        if config.infer_types {
            stages::infer::apply(
                &mut table,
                config.date_detect_thresh,
                &mut report.dtype_changes,
            );
        }
        stages::infer::finalize(&mut table);
        if config.detect_outliers {
            report.outliers_removed =
                stages::outliers::apply(&mut table, config, &mut report.outliers);
        }

        report.finish(table.shape());
        (table, report)
    }
}
