//! Pipeline configuration, validated once at the entry boundary.
//!
//! Callers hand in a flat, loosely-typed option map; [`CleanConfig`] turns
//! it into a structured object with explicit optional fields so the stages
//! never probe raw keys.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};

/// What to do with missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullHandling {
    /// Leave missing cells alone.
    #[default]
    None,
    /// Remove every row with at least one missing cell.
    DropRows,
    /// Fill missing cells per [`FillStrategy`].
    Fill,
}

/// Replacement value used when filling missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Column mean; numeric columns only.
    Mean,
    /// Column median; numeric columns only.
    Median,
    /// Most frequent non-missing value, first on ties.
    Mode,
    /// Caller-supplied literal, applied verbatim to every column.
    Constant,
}

/// Outlier detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Interquartile-range fences.
    #[default]
    Iqr,
    /// Population z-score cutoff.
    Zscore,
}

/// What to do with detected outliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierAction {
    /// Detect only; the table is unchanged.
    #[default]
    Report,
    /// Remove every row flagged by any eligible column.
    Drop,
}

/// Cleaning options. Every field is optional at the JSON boundary; a stage
/// runs only when its controlling option is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Trim surrounding whitespace in textual columns.
    pub trim_whitespace: bool,
    /// Remove rows that exactly duplicate an earlier row.
    pub drop_duplicates: bool,
    /// Remove rows where every cell is missing.
    pub drop_blank_rows: bool,
    /// Remove columns where every cell is missing.
    pub drop_blank_cols: bool,
    /// Normalize column names (trim, underscores, lowercase).
    pub normalize_columns: bool,
    /// Attempt numeric/datetime commits per column.
    pub infer_types: bool,
    /// Fraction of date-like values required before date parsing is tried,
    /// and the datetime commit threshold. Within `0..=1`.
    pub date_detect_thresh: f64,
    /// Missing-cell policy.
    pub null_handling: NullHandling,
    /// Fill strategy; `mode` when unset and `null_handling` is `fill`.
    pub fill_strategy: Option<FillStrategy>,
    /// Literal used by the `constant` strategy.
    pub fill_constant: Option<String>,
    /// Run outlier detection over numeric columns.
    pub detect_outliers: bool,
    /// Detection method.
    pub outlier_method: OutlierMethod,
    /// IQR multiplier or z-score cutoff; defaults to 1.5 / 3.0 per method.
    pub outlier_threshold: Option<f64>,
    /// Report or drop flagged rows.
    pub outlier_action: OutlierAction,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: false,
            drop_duplicates: false,
            drop_blank_rows: false,
            drop_blank_cols: false,
            normalize_columns: false,
            infer_types: false,
            date_detect_thresh: 0.5,
            null_handling: NullHandling::None,
            fill_strategy: None,
            fill_constant: None,
            detect_outliers: false,
            outlier_method: OutlierMethod::Iqr,
            outlier_threshold: None,
            outlier_action: OutlierAction::Report,
        }
    }
}

impl CleanConfig {
    /// Parse a loosely-typed JSON configuration. Keys set to JSON `null` are
    /// treated as absent (front ends send `null` for unselected options).
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let mut value = value.clone();
        if let Some(map) = value.as_object_mut() {
            map.retain(|_, v| !v.is_null());
        }
        let config: CleanConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency once at the boundary.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.date_detect_thresh) {
            return Err(ScourError::Config(format!(
                "date_detect_thresh must be within 0..=1, got {}",
                self.date_detect_thresh
            )));
        }
        if self.null_handling == NullHandling::Fill
            && self.fill_strategy == Some(FillStrategy::Constant)
            && self.fill_constant.is_none()
        {
            return Err(ScourError::Config(
                "fill_strategy 'constant' requires fill_constant".to_string(),
            ));
        }
        if let Some(threshold) = self.outlier_threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(ScourError::Config(format!(
                    "outlier_threshold must be a positive number, got {threshold}"
                )));
            }
        }
        Ok(())
    }

    /// Effective fill strategy: `mode` when unspecified.
    pub fn effective_fill_strategy(&self) -> FillStrategy {
        self.fill_strategy.unwrap_or(FillStrategy::Mode)
    }

    /// Effective outlier cutoff: 1.5 for IQR fences, 3.0 for z-scores.
    pub fn effective_outlier_threshold(&self) -> f64 {
        self.outlier_threshold.unwrap_or(match self.outlier_method {
            OutlierMethod::Iqr => 1.5,
            OutlierMethod::Zscore => 3.0,
        })
    }
}
